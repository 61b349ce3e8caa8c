//! Library commands: `libs`, `cxxflags`, `ldflags`, `cmakeflags`,
//! `includedirs`, `libfiles` and `defines`

use anyhow::Result;

use crate::cli::LibraryArgs;
use crate::commands::open_engine;
use ue4cli::ops::LibraryQuery;

/// Open the engine and run `f` against its library query surface.
fn with_query(f: impl FnOnce(&LibraryQuery<'_>) -> Result<String>) -> Result<()> {
    let engine = open_engine()?;
    let cache = engine.context().cache();
    let runner = engine.build_tool();
    let query = engine.query(&cache, &runner);

    println!("{}", f(&query)?);
    Ok(())
}

pub fn list() -> Result<()> {
    with_query(|query| {
        let names: Vec<String> = query.list_libraries()?.into_iter().collect();
        Ok(names.join("\n"))
    })
}

pub fn cxxflags(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.compiler_flags(&args.args))
}

pub fn ldflags(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.linker_flags(&args.args))
}

pub fn cmakeflags(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.cmake_flags(&args.args))
}

pub fn includedirs(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.include_dirs(&args.args))
}

pub fn libfiles(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.library_files(&args.args))
}

pub fn defines(args: LibraryArgs) -> Result<()> {
    with_query(|query| query.definitions(&args.args))
}
