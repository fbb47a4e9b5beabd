use miette::Result;

/// Main entry point for the ts-tangle CLI tool
fn main() -> Result<()> {
    // Install miette's panic and error handler for error reporting
    miette::set_panic_hook();

    ts_tangle::run()
}
