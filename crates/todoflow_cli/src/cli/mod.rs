use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "todoflow", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new todo
    ///
    /// Example: todoflow add "Buy milk" --priority high --due 2025-12-24
    Add {
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// RFC3339 timestamp or YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a todo; omitted fields stay as they are
    ///
    /// Example: todoflow edit <ID> --title "Buy oat milk"
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Flip a todo between active and completed
    ///
    /// Example: todoflow toggle <ID>
    Toggle {
        id: String,
    },
    /// Delete a todo permanently
    ///
    /// Example: todoflow delete <ID>
    Delete {
        id: String,
    },
    /// Show the dashboard: counts, tabs and the filtered list
    ///
    /// Example: todoflow list --status active --priority high
    List {
        /// all, active or completed
        #[arg(long)]
        status: Option<String>,
        /// all, low, medium or high
        #[arg(long)]
        priority: Option<String>,
    },
    /// Show the landing page
    ///
    /// Example: todoflow landing --theme noir
    Landing {
        #[arg(long)]
        theme: Option<String>,
    },
}

/// One line typed into the interactive dashboard.
#[derive(Parser, Debug)]
#[command(name = "todoflow", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add a todo through the create form
    Add {
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a todo by list position or id
    Edit {
        target: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Toggle a todo by list position or id
    Toggle {
        target: String,
    },
    /// Delete a todo by list position or id
    Delete {
        target: String,
    },
    /// Change a filter
    Filter {
        #[command(subcommand)]
        filter: FilterCommand,
    },
    /// Redraw the dashboard
    List,
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// all, active or completed
    Status { value: String },
    /// all, low, medium or high
    Priority { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    StatusFilter,
    PriorityFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "status_filter" | "status" => ConfigOverrideTarget::StatusFilter,
        "priority_filter" | "priority" => ConfigOverrideTarget::PriorityFilter,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
