// sparkify/src/commands/ddl.rs
//
// USE CASE: Print the statements the loader runs before inserting.

use sparkify_core::application::Loader;

pub fn execute() -> anyhow::Result<()> {
    for statement in Loader::ddl() {
        println!("{statement};\n");
    }
    Ok(())
}
