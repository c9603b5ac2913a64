//! Line-oriented intake shell.
//!
//! The shell is a thin view over one [`FormStore`] session: each line is parsed into a
//! command, form edits are sent to the store as [`FormEvent`]s, and the summaries of
//! sections reported by the store's change notifications are re-rendered afterwards.

use intake_core::{
    Change, FlagField, FormEvent, FormStore, IntakeError, IntakeResult, SectionKey, TextField,
    ToggleField, catalogue, summary,
};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const HELP: &str = "\
Commands:
  show [section|all]            show the summary of a section (default: current)
  where                         show the current section and progress
  sections                      list sections in order
  goto <section>                jump to a section
  next | prev                   step through sections
  set <field> <value...>        set a text field (empty value clears it)
  flag <field> yes|no|unset     set a yes/no field
  check <list> <item...>        tick an item in a list field
  uncheck <list> <item...>      untick an item in a list field
  options [field]               list options for a field
  fields                        list editable fields
  export [json|yaml]            print the whole record
  help                          show this help
  quit                          end the session";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Show(Option<SectionKey>),
    ShowAll,
    Where,
    Sections,
    Edit(FormEvent),
    Options(Option<String>),
    Fields,
    Export(ExportFormat),
    Help,
    Quit,
}

/// Splits `rest` into its first word and the remainder, trimmed.
fn split_word(rest: &str) -> (&str, &str) {
    let rest = rest.trim();
    match rest.split_once(char::is_whitespace) {
        Some((word, tail)) => (word, tail.trim()),
        None => (rest, ""),
    }
}

fn parse_flag(value: &str) -> IntakeResult<Option<bool>> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(Some(true)),
        "no" | "n" | "false" => Ok(Some(false)),
        "unset" | "none" | "" => Ok(None),
        other => Err(IntakeError::InvalidInput(format!(
            "expected yes, no or unset (got {other:?})"
        ))),
    }
}

fn missing(what: &str) -> IntakeError {
    IntakeError::InvalidInput(format!("missing {what}"))
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> IntakeResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let command = match verb.to_ascii_lowercase().as_str() {
        "show" => match rest {
            "" => Command::Show(None),
            "all" => Command::ShowAll,
            key => Command::Show(Some(key.parse()?)),
        },
        "where" => Command::Where,
        "sections" => Command::Sections,
        "goto" => {
            if rest.is_empty() {
                return Err(missing("section"));
            }
            Command::Edit(FormEvent::Goto(rest.parse()?))
        }
        "next" => Command::Edit(FormEvent::Next),
        "prev" | "previous" => Command::Edit(FormEvent::Previous),
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(missing("field"));
            }
            Command::Edit(FormEvent::Set {
                field: field.parse::<TextField>()?,
                value: value.to_string(),
            })
        }
        "flag" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(missing("field"));
            }
            Command::Edit(FormEvent::Flag {
                field: field.parse::<FlagField>()?,
                value: parse_flag(value)?,
            })
        }
        verb @ ("check" | "uncheck") => {
            let (field, item) = split_word(rest);
            if field.is_empty() {
                return Err(missing("list field"));
            }
            if item.is_empty() {
                return Err(missing("item"));
            }
            Command::Edit(FormEvent::Toggle {
                field: field.parse::<ToggleField>()?,
                item: item.to_string(),
                present: verb == "check",
            })
        }
        "options" => Command::Options((!rest.is_empty()).then(|| rest.to_string())),
        "fields" => Command::Fields,
        "export" => match rest.to_ascii_lowercase().as_str() {
            "" | "yaml" => Command::Export(ExportFormat::Yaml),
            "json" => Command::Export(ExportFormat::Json),
            other => {
                return Err(IntakeError::InvalidInput(format!(
                    "unknown export format: {other}"
                )))
            }
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(IntakeError::InvalidInput(format!(
                "unknown command: {other} (try 'help')"
            )))
        }
    };
    Ok(Some(command))
}

fn write_options<W: Write>(out: &mut W, path: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = path else {
        for field in ToggleField::ALL {
            writeln!(out, "{field} ({} options)", catalogue::options(field).len())?;
        }
        return Ok(());
    };

    if let Ok(field) = path.parse::<ToggleField>() {
        for option in catalogue::options(field) {
            writeln!(out, "  {}", catalogue::describe(field, option))?;
        }
        return Ok(());
    }

    match catalogue::choices(path.parse::<TextField>()?) {
        Some(options) => {
            for option in options {
                writeln!(out, "  {option}")?;
            }
        }
        None => writeln!(out, "{path} is free text")?,
    }
    Ok(())
}

/// Executes one command. Returns `false` when the session should end.
fn execute<W: Write>(store: &mut FormStore, command: Command, out: &mut W) -> anyhow::Result<bool> {
    match command {
        Command::Show(section) => {
            let section = match section {
                Some(section) => section,
                None => store.active_section()?,
            };
            write!(out, "{}", summary::summarise(store.record()?, section))?;
        }
        Command::ShowAll => {
            let record = store.record()?;
            for section in SectionKey::ORDER {
                write!(out, "{}", summary::summarise(record, section))?;
            }
        }
        Command::Where => {
            let section = store.active_section()?;
            writeln!(out, "{} - {}", section.label(), store.progress()?)?;

            let session = store.session()?;
            let started = session.started_at.format("%Y-%m-%d %H:%M UTC");
            match &session.clinician {
                Some(clinician) => writeln!(out, "Session started {started} by {clinician}")?,
                None => writeln!(out, "Session started {started}")?,
            }
        }
        Command::Sections => {
            let active = store.active_section()?;
            for (index, section) in SectionKey::ORDER.iter().enumerate() {
                let marker = if *section == active { '*' } else { ' ' };
                writeln!(out, "{marker} {}. {} ({section})", index + 1, section.label())?;
            }
        }
        Command::Edit(event) => store.apply(event)?,
        Command::Options(path) => write_options(out, path.as_deref())?,
        Command::Fields => {
            for field in TextField::ALL {
                writeln!(out, "set     {field}")?;
            }
            for field in FlagField::ALL {
                writeln!(out, "flag    {field}")?;
            }
            for field in ToggleField::ALL {
                writeln!(out, "check   {field}")?;
            }
        }
        Command::Export(format) => {
            let record = store.record()?;
            let text = match format {
                ExportFormat::Json => record.to_json_pretty()?,
                ExportFormat::Yaml => record.to_yaml()?,
            };
            writeln!(out, "{}", text.trim_end())?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Renders what the store reported since the last command.
fn render_changes<W: Write>(
    store: &FormStore,
    changes: Vec<Change>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut rendered = Vec::new();
    for change in changes {
        match change {
            Change::Updated(section) => {
                if !rendered.contains(&section) {
                    rendered.push(section);
                    write!(out, "{}", summary::summarise(store.record()?, section))?;
                }
            }
            Change::Navigated { to, .. } => {
                writeln!(out, "-> {} - {}", to.label(), store.progress()?)?;
            }
        }
    }
    Ok(())
}

/// Runs the shell until `quit` or end of input.
///
/// Input errors are reported on `out` and the session carries on. The shell's
/// subscription is removed before returning, including when `out` or `input` fails.
pub fn run<R: BufRead, W: Write>(store: &mut FormStore, input: R, mut out: W) -> anyhow::Result<()> {
    let pending: Rc<RefCell<Vec<Change>>> = Rc::default();
    let sink = Rc::clone(&pending);
    let subscription = store.subscribe(move |change, _| sink.borrow_mut().push(*change))?;

    let result = read_eval_loop(store, &pending, input, &mut out);
    store.unsubscribe(subscription);
    result
}

fn read_eval_loop<R: BufRead, W: Write>(
    store: &mut FormStore,
    pending: &RefCell<Vec<Change>>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Type 'help' for commands.")?;
    let mut lines = input.lines();
    loop {
        write!(out, "[{}] > ", store.active_section()?.label())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match execute(store, command, out) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(err) => writeln!(out, "error: {err}")?,
        }

        let changes = std::mem::take(&mut *pending.borrow_mut());
        render_changes(store, changes, out)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{CoreConfig, NonEmptyText, VitalSign};
    use std::io::Cursor;
    use std::sync::Arc;

    fn store() -> FormStore {
        let mut store = FormStore::with_static_suggestions(Arc::new(CoreConfig::default()));
        store.start().expect("start");
        store
    }

    fn run_script(store: &mut FormStore, script: &str) -> String {
        let mut out = Vec::new();
        run(store, Cursor::new(script), &mut out).expect("run shell");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn parses_set_with_spaces_in_value() {
        let command = parse_line("set demographics.name  Jane Doe ").expect("parse");
        assert_eq!(
            command,
            Some(Command::Edit(FormEvent::Set {
                field: TextField::Name,
                value: "Jane Doe".into(),
            }))
        );
    }

    #[test]
    fn parses_navigation_and_toggles() {
        assert_eq!(
            parse_line("goto ai-suggestions").expect("parse"),
            Some(Command::Edit(FormEvent::Goto(SectionKey::AiSuggestions)))
        );
        assert_eq!(
            parse_line("prev").expect("parse"),
            Some(Command::Edit(FormEvent::Previous))
        );
        assert_eq!(
            parse_line("uncheck complaints.selectedComplaints Shortness of breath")
                .expect("parse"),
            Some(Command::Edit(FormEvent::Toggle {
                field: ToggleField::SelectedComplaints,
                item: "Shortness of breath".into(),
                present: false,
            }))
        );
    }

    #[test]
    fn parses_flags() {
        assert_eq!(
            parse_line("flag feedback.aiAccuracy unset").expect("parse"),
            Some(Command::Edit(FormEvent::Flag {
                field: FlagField::AiAccuracy,
                value: None,
            }))
        );
        assert!(parse_line("flag feedback.aiAccuracy maybe").is_err());
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(parse_line("   ").expect("parse"), None);
        assert_eq!(parse_line("# vitals next").expect("parse"), None);
    }

    #[test]
    fn rejects_unknown_commands_and_keys() {
        assert!(matches!(
            parse_line("goto labs"),
            Err(IntakeError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_line("frobnicate"),
            Err(IntakeError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_line("check complaints.selectedComplaints"),
            Err(IntakeError::InvalidInput(_))
        ));
    }

    #[test]
    fn session_edits_reach_the_store() {
        let mut store = store();
        let output = run_script(
            &mut store,
            "set examination.vitals.bp 120/80\n\
             set examination.vitals.hr 72\n\
             check complaints.selectedComplaints Fever\n\
             check complaints.selectedComplaints Cough\n\
             uncheck complaints.selectedComplaints Fever\n\
             goto investigations\n\
             next\n\
             quit\n\
             set demographics.name ignored after quit\n",
        );

        let record = store.record().expect("record");
        assert_eq!(record.examination.vitals.get(VitalSign::Bp), "120/80");
        assert_eq!(record.examination.vitals.get(VitalSign::Hr), "72");
        assert_eq!(record.complaints.selected_complaints, vec!["Cough"]);
        assert_eq!(record.demographics.name, "");
        assert_eq!(
            store.active_section().expect("active"),
            SectionKey::AiSuggestions
        );

        assert!(output.contains("Selected: Cough"));
        assert!(output.contains("-> AI Suggestions - Step 6 of 7"));
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let mut store = store();
        let output = run_script(
            &mut store,
            "set demographics.sex unknown\nset demographics.age 40\n",
        );

        assert!(output.contains("error: invalid input"));
        assert_eq!(store.record().expect("record").demographics.age, "40");
    }

    #[test]
    fn end_of_input_ends_the_session_loop() {
        let mut store = store();
        let output = run_script(&mut store, "where");

        assert!(output.contains("Demographics - Step 1 of 7 (14% complete)"));
        assert!(output.contains("Session started "));
        assert!(store.is_active());
        assert_eq!(store.listener_count().expect("count"), 0);
    }

    #[test]
    fn where_names_the_clinician() {
        let cfg = CoreConfig::new(
            SectionKey::History,
            Some(NonEmptyText::new("Dr Mensah").expect("name")),
        );
        let mut store = FormStore::with_static_suggestions(Arc::new(cfg));
        store.start().expect("start");

        let output = run_script(&mut store, "where\n");
        assert!(output.contains("History - Step 3 of 7 (43% complete)"));
        assert!(output.contains(" by Dr Mensah"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_failure_still_unsubscribes() {
        let mut store = store();
        let err = run(&mut store, Cursor::new("next\n"), BrokenPipe).expect_err("write fails");
        assert!(err.to_string().contains("closed"));

        assert_eq!(store.listener_count().expect("count"), 0);
    }

    #[test]
    fn options_lists_choices() {
        let mut store = store();
        let output = run_script(
            &mut store,
            "options history.progression\noptions demographics.name\n",
        );
        assert!(output.contains("  Stable/Static"));
        assert!(output.contains("demographics.name is free text"));
    }

    #[test]
    fn suggested_investigations_show_priority_and_reason() {
        let mut store = store();
        let output = run_script(&mut store, "options investigations.suggested\n");
        assert!(output.contains("  ECG [Medium] - To assess cardiac rhythm and rule out ischemia"));
    }
}
