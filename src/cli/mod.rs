// CLI subcommand implementations
pub mod bootstrap;
