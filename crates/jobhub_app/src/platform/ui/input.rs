use jobhub_core::JobStatus;

pub const HELP: &str = "\
Commands:
  add <url>              submit a posting URL for scraping
  status <row|id>        open or close the status picker of a job
  status <row|id> <new>  set the status (New, Applied, Interview, Offer, Rejected)
  snapshot <row|id>      write the captured page to an HTML file
  dismiss <n>            remove pending submission n
  reload                 fetch the job list again
  show                   redraw the dashboard
  help                   show this help
  quit                   leave the dashboard";

/// One line typed into the interactive dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Status {
        job: String,
        status: Option<JobStatus>,
    },
    Snapshot(String),
    Dismiss(usize),
    Reload,
    Show,
    Help,
    Quit,
}

/// `Ok(None)` for blank input.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("add" | "a", [url]) => Command::Add((*url).to_string()),
        ("status" | "s", [job]) => Command::Status {
            job: (*job).to_string(),
            status: None,
        },
        ("status" | "s", [job, status]) => Command::Status {
            job: (*job).to_string(),
            status: Some(status.parse().map_err(|err| format!("{err}"))?),
        },
        ("snapshot" | "snap", [job]) => Command::Snapshot((*job).to_string()),
        ("dismiss" | "d", [n]) => Command::Dismiss(
            n.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("not a pending row number: {n}"))?,
        ),
        ("reload" | "r", []) => Command::Reload,
        ("show" | "ls", []) => Command::Show,
        ("help" | "h" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        (verb, _) => return Err(format!("unrecognized command {verb:?}; type `help`")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn add_takes_one_url() {
        assert_eq!(
            parse_command("add https://jobs.example.com/1"),
            Ok(Some(Command::Add("https://jobs.example.com/1".to_string())))
        );
        assert!(parse_command("add").is_err());
    }

    #[test]
    fn status_with_and_without_value() {
        assert_eq!(
            parse_command("status 2"),
            Ok(Some(Command::Status {
                job: "2".to_string(),
                status: None
            }))
        );
        assert_eq!(
            parse_command("S job-9 offer"),
            Ok(Some(Command::Status {
                job: "job-9".to_string(),
                status: Some(JobStatus::Offer)
            }))
        );
        assert!(parse_command("status 2 ghosted").is_err());
    }

    #[test]
    fn dismiss_requires_positive_number() {
        assert_eq!(parse_command("dismiss 1"), Ok(Some(Command::Dismiss(1))));
        assert!(parse_command("dismiss 0").is_err());
        assert!(parse_command("dismiss x").is_err());
    }

    #[test]
    fn unknown_verbs_are_reported() {
        assert!(parse_command("launch rockets").is_err());
        assert_eq!(parse_command("Q"), Ok(Some(Command::Quit)));
    }
}
