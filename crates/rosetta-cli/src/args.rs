//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Resolve a message key from a translation catalog.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "ROSETTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog file, overriding the configured one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Requested language tag
    #[arg(short, long = "lang", value_name = "TAG")]
    pub language: Option<String>,

    /// Fallback language tag
    #[arg(short, long, value_name = "TAG")]
    pub fallback: Option<String>,

    /// Interpolation parameter, repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Note for translators, shown in the missing-translation warning
    #[arg(long)]
    pub comment: Option<String>,

    /// Treat KEY as `singular,plural[,count]`
    #[arg(long)]
    pub plural: bool,

    /// Log level, overriding the configured one
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Message key to resolve
    pub key: String,
}

impl Args {
    /// The key split into its plural candidates when `--plural` is set.
    pub fn key_parts(&self) -> Vec<String> {
        if self.plural {
            self.key.split(',').map(|part| part.trim().to_string()).collect()
        } else {
            vec![self.key.clone()]
        }
    }
}

/// Parses a `name=value` pair.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("user=Ana").unwrap(),
            ("user".to_string(), "Ana".to_string())
        );
        assert_eq!(
            parse_param("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_param("empty=").unwrap().1, "");
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "rosetta",
            "--lang",
            "es-MX",
            "-f",
            "en",
            "-p",
            "count=3",
            "--param",
            "user=Ana",
            "--plural",
            "itemSingular, itemPlural, count",
        ])
        .unwrap();

        assert_eq!(args.language.as_deref(), Some("es-MX"));
        assert_eq!(args.fallback.as_deref(), Some("en"));
        assert_eq!(args.params.len(), 2);
        assert_eq!(args.key_parts(), vec!["itemSingular", "itemPlural", "count"]);
    }

    #[test]
    fn test_plain_key_is_not_split() {
        let args = Args::try_parse_from(["rosetta", "a,b"]).unwrap();
        assert_eq!(args.key_parts(), vec!["a,b"]);
        assert!(Args::try_parse_from(["rosetta"]).is_err());
        assert!(Args::try_parse_from(["rosetta", "-p", "oops", "key"]).is_err());
    }
}
