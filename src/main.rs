use clap::{Parser, Subcommand};
use docs_migrate::{config, convert, logging, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docs-migrate")]
#[command(about = "Convert a Docusaurus docs tree into a Nextra content tree")]
#[command(long_about = "\
Convert a Docusaurus docs tree into a Nextra content tree

The destination is deleted and rebuilt on every run:

  docs-old/docs/                   src/content/
  ├── intro.md                     ├── _meta.js      # sidebar order
  ├── install.mdx         →        ├── index.mdx     # intro → index
  ├── code/  (no .md/.mdx)         ├── install.mdx
  └── guides/                      └── guides/
      └── routing.md                   ├── _meta.js
                                       └── routing.mdx

Per document: frontmatter is dropped, :::admonitions become > [!NOTE]
callouts, code fence attributes are stripped, MDX imports and React
components are removed. Pages with a `slug` get a redirect written to
redirects.json.

Run 'docs-migrate gen-config' to print a documented convert.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./convert.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Docusaurus docs directory
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Nextra content directory (deleted and rebuilt)
    #[arg(long, global = true)]
    destination: Option<PathBuf>,

    /// Redirects JSON file
    #[arg(long, global = true)]
    redirects: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full conversion (the default)
    Convert,
    /// Print a stock convert.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Convert) {
        Command::Convert => {
            let config_path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
            let mut config = config::load_config(&config_path)?;
            if let Some(source) = cli.source {
                config.source = source;
            }
            if let Some(destination) = cli.destination {
                config.destination = destination;
            }
            if let Some(redirects) = cli.redirects {
                config.redirects_file = redirects;
            }

            println!(
                "==> Converting {} → {}",
                config.source.display(),
                config.destination.display()
            );
            let conversion =
                convert::convert_with(&config.source, &config.destination, config.options())?;
            output::print_convert_output(&conversion);

            if let Some(parent) = config.redirects_file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let json = serde_json::to_string_pretty(&conversion.redirects)?;
            std::fs::write(&config.redirects_file, json)?;
            println!("==> Redirects written to {}", config.redirects_file.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
