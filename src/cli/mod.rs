use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask the model for products matching a free-text description
    Recommend {
        query: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the curated featured products
    Featured {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every product in a category
    Category {
        name: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the catalog's categories
    Categories,

    /// Verify the environment is configured for recommendations
    Check,

    /// Interactive session: type queries, `:featured`, `:category <name>`,
    /// `:categories` or `:quit`. Ctrl-C aborts a running request.
    Shell,
}
