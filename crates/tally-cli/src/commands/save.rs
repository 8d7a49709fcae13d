//! Save command for storing the input as the session.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;

use crate::Config;
use crate::input::{InputArgs, InputSource};
use crate::session::{self, Session};

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Let `tally watch` keep recalculating this session.
    #[arg(long, conflicts_with = "no_auto_update")]
    pub auto_update: bool,

    /// Keep `tally watch` from recalculating this session.
    #[arg(long)]
    pub no_auto_update: bool,
}

impl SaveArgs {
    /// Explicit flags win; otherwise the saved setting carries over.
    fn resolve_auto_update(&self, config: &Config) -> Result<bool> {
        if self.no_auto_update {
            Ok(false)
        } else if self.auto_update {
            Ok(true)
        } else {
            session::auto_update(&config.session_path)
        }
    }
}

pub fn run<W: Write>(writer: &mut W, args: &SaveArgs, config: &Config) -> Result<()> {
    let source = args.input.source();
    if source == InputSource::Session && args.input.target.is_none() {
        bail!("nothing to save; pass lines, --file, or --target");
    }

    let inputs = args.input.load(config)?;
    let mut saved = Session::new(inputs.lines.join("\n"), Some(inputs.target));
    saved.auto_update = args.resolve_auto_update(config)?;
    session::save(&config.session_path, &saved)?;

    writeln!(
        writer,
        "Saved {} line(s) with a {} hour target to {}",
        inputs.lines.len(),
        inputs.target,
        config.session_path.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            session_path: dir.join("session.json"),
            ..Config::default()
        }
    }

    fn save_args(lines: &[&str]) -> SaveArgs {
        SaveArgs {
            input: InputArgs {
                lines: lines.iter().map(ToString::to_string).collect(),
                ..InputArgs::default()
            },
            auto_update: false,
            no_auto_update: false,
        }
    }

    #[test]
    fn save_writes_lines_and_target() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let mut args = save_args(&["5:00 - 8:05am", "9:45 -"]);
        args.input.target = Some("7.5".parse().unwrap());

        let mut output = Vec::new();
        run(&mut output, &args, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(
            &config.session_path.display().to_string(),
            "[TEMP]/session.json",
        );
        assert_snapshot!(
            output,
            @"Saved 2 line(s) with a 7.5 hour target to [TEMP]/session.json"
        );

        let saved = session::load(&config.session_path).unwrap().unwrap();
        assert_eq!(saved.input_text, "5:00 - 8:05am\n9:45 -");
        assert!(saved.auto_update);
    }

    #[test]
    fn save_can_disable_auto_update() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let mut args = save_args(&["9 - 10"]);
        args.no_auto_update = true;

        run(&mut Vec::new(), &args, &config).unwrap();

        let saved = session::load(&config.session_path).unwrap().unwrap();
        assert!(!saved.auto_update);
        assert_eq!(saved.target_hours, Some(config.target_hours));
    }

    #[test]
    fn save_retargets_existing_session() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        session::save(&config.session_path, &Session::new("1 - 2", None)).unwrap();

        let mut args = save_args(&[]);
        args.input.target = Some("4".parse().unwrap());
        run(&mut Vec::new(), &args, &config).unwrap();

        let saved = session::load(&config.session_path).unwrap().unwrap();
        assert_eq!(saved.input_text, "1 - 2");
        assert_eq!(saved.target_hours.unwrap().minutes(), 240);
    }

    #[test]
    fn save_retarget_keeps_disabled_auto_update() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let mut existing = Session::new("1 - 2", None);
        existing.auto_update = false;
        session::save(&config.session_path, &existing).unwrap();

        let mut args = save_args(&[]);
        args.input.target = Some("4".parse().unwrap());
        run(&mut Vec::new(), &args, &config).unwrap();

        let saved = session::load(&config.session_path).unwrap().unwrap();
        assert_eq!(saved.target_hours.unwrap().minutes(), 240);
        assert!(!saved.auto_update);
    }

    #[test]
    fn save_auto_update_flag_turns_it_back_on() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let mut existing = Session::new("1 - 2", None);
        existing.auto_update = false;
        session::save(&config.session_path, &existing).unwrap();

        let mut args = save_args(&["9 - 10"]);
        args.auto_update = true;
        run(&mut Vec::new(), &args, &config).unwrap();

        assert!(session::load(&config.session_path).unwrap().unwrap().auto_update);
    }

    #[test]
    fn save_without_input_errors() {
        let temp = tempfile::tempdir().unwrap();
        let err = run(&mut Vec::new(), &save_args(&[]), &config_in(temp.path())).unwrap_err();
        assert!(err.to_string().contains("nothing to save"));
    }
}
