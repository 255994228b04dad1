use facet::Facet;

#[derive(Facet)]
pub struct Args {
    /// Markdown note or directory to process
    #[facet(positional, default = ".".to_string())]
    pub source: String,

    /// Set the name filter of every base block to this value
    #[facet(named, short = 'f', long, default)]
    pub filter: Option<String>,

    /// Remove the name filter from every base block
    #[facet(named, short = 'x', long, default)]
    pub clear: bool,

    /// List base blocks and their current name filter
    #[facet(named, short = 's', long, default)]
    pub show: bool,

    /// Code fence language of inline base blocks (overrides the settings file)
    #[facet(named, short = 'l', long, default)]
    pub lang: Option<String>,

    /// Leave embedded .base files alone
    #[facet(named, long, default)]
    pub no_embeds: bool,

    /// Settings file to read instead of the nearest basefilter.toml
    #[facet(named, short = 'c', long, default)]
    pub config: Option<String>,

    /// Preview changes without writing files
    #[facet(named, short = 'n', long, default)]
    pub dry_run: bool,

    /// Show verbose output
    #[facet(named, short = 'v', long, default)]
    pub verbose: bool,

    /// Show this help message
    #[facet(named, short = 'h', long, default)]
    pub help: bool,
}

/// What a run does to the blocks it finds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Set the name filter; an empty value removes it
    Set(String),
    Show,
}

impl Args {
    /// Picks the run mode. Exactly one of `--filter`, `--clear` and `--show` must be given.
    pub fn mode(&self) -> Result<Mode, String> {
        let chosen = [self.filter.is_some(), self.clear, self.show]
            .iter()
            .filter(|&&on| on)
            .count();
        if chosen != 1 {
            return Err("exactly one of --filter, --clear or --show is required".to_string());
        }

        Ok(if self.show {
            Mode::Show
        } else if self.clear {
            Mode::Set(String::new())
        } else {
            Mode::Set(self.filter.clone().unwrap_or_default())
        })
    }
}

pub fn print_usage() {
    println!("Usage: basefilter [OPTIONS] <SOURCE>");
    println!();
    println!("Keep the name filter of base query blocks in Markdown notes in sync.");
    println!();
    println!("Arguments:");
    println!("  <SOURCE>              Markdown note or directory to process (default: '.')");
    println!();
    println!("Options:");
    println!("  -f, --filter <value>  Set the name filter of every base block");
    println!("  -x, --clear           Remove the name filter from every base block");
    println!("  -s, --show            List base blocks and their current name filter");
    println!("  -l, --lang <language> Code fence language of inline blocks (default: 'base')");
    println!("      --no-embeds       Leave embedded .base files alone");
    println!("  -c, --config <file>   Settings file (default: nearest basefilter.toml)");
    println!("  -n, --dry-run         Preview changes without writing files");
    println!("  -v, --verbose         Show verbose output");
    println!("  -h, --help            Show this help message");
    println!();
    println!("Examples:");
    println!("  # Only show people whose note name contains 'Adam'");
    println!("  basefilter --filter Adam (or `-f Adam`)");
    println!();
    println!("  # Preview clearing the filter across the whole vault");
    println!("  basefilter --clear --dry-run (or `-x -n`)");
    println!();
    println!("  # See which blocks are filtered and by what");
    println!("  basefilter --show notes/");
}
