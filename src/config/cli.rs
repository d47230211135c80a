use crate::config::profile::Profile;
use crate::config::LaunchOverrides;
use clap::{Parser, ValueEnum};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "helm-launcher")]
#[command(about = "Summarize a HELM benchmark suite and serve the results")]
#[command(version)]
#[command(args_override_self = true)]
pub struct CliArgs {
    /// Benchmark suite to summarize
    #[arg(short = 'n', long = "suite")]
    pub suite: Option<String>,

    /// Port for the results server
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Deployment variant supplying the defaults
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,

    /// TOML file overriding framework paths and commands
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of the benchmarking framework checkout
    #[arg(long)]
    pub framework_root: Option<PathBuf>,

    /// Print the planned commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> LaunchOverrides {
        LaunchOverrides {
            profile: self.profile,
            suite_name: self.suite.clone(),
            port: self.port,
            framework_root: self.framework_root.clone(),
        }
    }
}

struct FlagSpec {
    short: Option<char>,
    long: &'static str,
    takes_value: bool,
}

const KNOWN_FLAGS: &[FlagSpec] = &[
    FlagSpec { short: Some('n'), long: "suite", takes_value: true },
    FlagSpec { short: Some('p'), long: "port", takes_value: true },
    FlagSpec { short: Some('c'), long: "config", takes_value: true },
    FlagSpec { short: None, long: "profile", takes_value: true },
    FlagSpec { short: None, long: "framework-root", takes_value: true },
    FlagSpec { short: None, long: "format", takes_value: true },
    FlagSpec { short: None, long: "dry-run", takes_value: false },
    FlagSpec { short: Some('v'), long: "verbose", takes_value: false },
    FlagSpec { short: None, long: "json-logs", takes_value: false },
    FlagSpec { short: Some('h'), long: "help", takes_value: false },
    FlagSpec { short: Some('V'), long: "version", takes_value: false },
];

impl FlagSpec {
    /// 帶值旗標統一改寫成 `--long=value`，值以 '-' 開頭也不會被 clap 誤認
    fn with_value(&self, value: &OsStr) -> OsString {
        let mut arg = OsString::from(format!("--{}=", self.long));
        arg.push(value);
        arg
    }
}

/// 分離已知參數與未知參數。
///
/// 未知旗標與多餘的位置參數會被丟棄而非報錯；
/// `-vn s` 這類合併的短旗標逐字拆開，只丟棄不認得的字元。
pub fn split_known_args<I, T>(args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut known: Vec<OsString> = iter.next().into_iter().collect();
    let mut ignored = Vec::new();

    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();

        if let Some(long) = text.strip_prefix("--") {
            if long.is_empty() {
                // "--" 之後沒有任何可用參數
                ignored.extend(iter.by_ref().map(|a| a.to_string_lossy().into_owned()));
                break;
            }
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            match KNOWN_FLAGS.iter().find(|f| f.long == name) {
                Some(flag) if flag.takes_value && !inline_value => match iter.next() {
                    Some(value) => known.push(flag.with_value(&value)),
                    None => known.push(arg),
                },
                Some(_) => known.push(arg),
                None => ignored.push(text),
            }
        } else if text.len() > 1 && text.starts_with('-') {
            let group = &text[1..];
            for (offset, c) in group.char_indices() {
                match KNOWN_FLAGS.iter().find(|f| f.short == Some(c)) {
                    Some(flag) if flag.takes_value => {
                        let rest = &group[offset + c.len_utf8()..];
                        if !rest.is_empty() {
                            known.push(flag.with_value(OsStr::new(rest)));
                        } else if let Some(value) = iter.next() {
                            known.push(flag.with_value(&value));
                        } else {
                            known.push(OsString::from(format!("-{}", c)));
                        }
                        break;
                    }
                    Some(_) => known.push(OsString::from(format!("-{}", c))),
                    None => ignored.push(format!("-{}", c)),
                }
            }
        } else {
            ignored.push(text);
        }
    }

    (known, ignored)
}

/// 解析命令列，回傳結果與被忽略的參數
pub fn parse_lenient<I, T>(args: I) -> (CliArgs, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let (known, ignored) = split_known_args(args);
    (CliArgs::parse_from(known), ignored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (CliArgs, Vec<String>) {
        let mut full = vec!["helm-launcher"];
        full.extend_from_slice(args);
        let (known, ignored) = split_known_args(full);
        (CliArgs::try_parse_from(known).unwrap(), ignored)
    }

    #[test]
    fn test_no_flags() {
        let (args, ignored) = parse(&[]);
        assert_eq!(args.suite, None);
        assert_eq!(args.port, None);
        assert!(!args.dry_run);
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_short_flags() {
        let (args, _) = parse(&["-n", "mysuite", "-p", "9090"]);
        assert_eq!(args.suite.as_deref(), Some("mysuite"));
        assert_eq!(args.port, Some(9090));
    }

    #[test]
    fn test_attached_and_long_forms() {
        let (args, _) = parse(&["-nmysuite", "--port=9091"]);
        assert_eq!(args.suite.as_deref(), Some("mysuite"));
        assert_eq!(args.port, Some(9091));
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let (args, ignored) = parse(&["-x", "-n", "s1", "--bogus", "extra", "-p", "8100"]);
        assert_eq!(args.suite.as_deref(), Some("s1"));
        assert_eq!(args.port, Some(8100));
        assert_eq!(ignored, vec!["-x", "--bogus", "extra"]);
    }

    #[test]
    fn test_grouped_short_flags_keep_known_options() {
        let (args, ignored) = parse(&["-vn", "s"]);
        assert!(args.verbose);
        assert_eq!(args.suite.as_deref(), Some("s"));
        assert!(ignored.is_empty());

        let (args, ignored) = parse(&["-xp", "9090"]);
        assert_eq!(args.port, Some(9090));
        assert_eq!(ignored, vec!["-x"]);

        let (args, ignored) = parse(&["-zvp9091"]);
        assert!(args.verbose);
        assert_eq!(args.port, Some(9091));
        assert_eq!(ignored, vec!["-z"]);
    }

    #[test]
    fn test_repeated_flags_last_value_wins() {
        let (args, _) = parse(&["-p", "8000", "-n", "first", "-p", "9090", "-n", "second"]);
        assert_eq!(args.port, Some(9090));
        assert_eq!(args.suite.as_deref(), Some("second"));
    }

    #[test]
    fn test_value_starting_with_dash_is_kept() {
        let (args, _) = parse(&["-n", "-weird"]);
        assert_eq!(args.suite.as_deref(), Some("-weird"));

        let (args, _) = parse(&["--suite", "-also-weird"]);
        assert_eq!(args.suite.as_deref(), Some("-also-weird"));
    }

    #[test]
    fn test_double_dash_ends_parsing() {
        let (args, ignored) = parse(&["-p", "9000", "--", "-n", "late"]);
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.suite, None);
        assert_eq!(ignored, vec!["-n", "late"]);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let (known, _) = split_known_args(["helm-launcher", "-p", "abc"]);
        assert!(CliArgs::try_parse_from(known).is_err());

        let (known, _) = split_known_args(["helm-launcher", "-p", "0"]);
        assert!(CliArgs::try_parse_from(known).is_err());
    }

    #[test]
    fn test_overrides_carry_flags() {
        let (args, _) = parse(&["--profile", "nl2sql", "-p", "9999"]);
        let overrides = args.overrides();
        assert_eq!(overrides.profile, Some(Profile::Nl2sql));
        assert_eq!(overrides.port, Some(9999));
        assert_eq!(overrides.suite_name, None);
    }

    #[test]
    fn test_dry_run_json() {
        let (args, _) = parse(&["--dry-run", "--format", "json"]);
        assert!(args.dry_run);
        assert_eq!(args.format, OutputFormat::Json);
    }
}
