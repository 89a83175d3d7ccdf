//! Tests of modification-time comparison against real files.

use crate::e2e::*;

const RULES: &str = "
lib.a: x.o y.o
\tar rcs $@ $^
\techo changed: $?
";

#[test]
fn up_to_date() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("nmakefile", RULES)?;
    space.touch("x.o", 1_000_000)?;
    space.touch("y.o", 1_000_000)?;
    space.touch("lib.a", 1_000_100)?;
    let out = space.run_expect(&mut nmake_command(vec!["lib.a"]))?;
    assert_eq!(stdout(&out), "nmake: 'lib.a' is up to date.\n");
    Ok(())
}

#[test]
fn same_mtime_is_up_to_date() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("nmakefile", RULES)?;
    space.touch("x.o", 1_000_000)?;
    space.touch("y.o", 1_000_000)?;
    space.touch("lib.a", 1_000_000)?;
    let out = space.run_expect(&mut nmake_command(vec!["lib.a"]))?;
    assert_output_contains(&out, "is up to date");
    Ok(())
}

#[test]
fn newer_prereq() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("nmakefile", RULES)?;
    space.touch("x.o", 1_000_000)?;
    space.touch("lib.a", 1_000_100)?;
    space.touch("y.o", 1_000_200)?;
    let out = space.run_expect(&mut nmake_command(vec!["lib.a"]))?;
    assert_eq!(stdout(&out), "ar rcs lib.a x.o y.o\necho changed: y.o\n");
    Ok(())
}

#[test]
fn missing_output() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("nmakefile", RULES)?;
    space.touch("x.o", 1_000_000)?;
    space.touch("y.o", 1_000_000)?;
    let out = space.run_expect(&mut nmake_command(vec!["lib.a"]))?;
    assert_eq!(stdout(&out), "ar rcs lib.a x.o y.o\necho changed: x.o y.o\n");
    Ok(())
}

#[test]
fn chain() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write(
        "nmakefile",
        "
prog: main.o
\tld -o prog main.o
main.o: main.c defs.h
\tcc -c main.c
",
    )?;
    space.touch("prog", 1_000_100)?;
    space.touch("main.o", 1_000_100)?;
    space.touch("main.c", 1_000_000)?;
    space.touch("defs.h", 1_000_000)?;
    let out = space.run_expect(&mut nmake_command(vec!["prog"]))?;
    assert_eq!(stdout(&out), "nmake: 'prog' is up to date.\n");

    space.touch("defs.h", 1_000_500)?;
    let out = space.run_expect(&mut nmake_command(vec!["prog"]))?;
    assert_eq!(stdout(&out), "cc -c main.c\nld -o prog main.o\n");
    Ok(())
}

#[test]
fn path_through_regular_file_is_missing() -> anyhow::Result<()> {
    let space = TestSpace::new()?;
    space.write("nmakefile", "build/out: src.c\n\tcc -o $@ $^\n")?;
    space.write("build", "not a directory")?;
    space.touch("src.c", 1_000_000)?;
    let out = space.run_expect(&mut nmake_command(vec!["build/out"]))?;
    assert_eq!(stdout(&out), "cc -o build/out src.c\n");

    let out = space.run_fail(&mut nmake_command(vec!["build/src.c"]))?;
    assert_eq!(stderr(&out), "nmake: no rule for build/src.c\n");
    Ok(())
}
