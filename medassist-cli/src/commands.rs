use anyhow::{Context, bail};

pub const HELP: &str = "\
commands:
  <text>             send a chat message
  /image [query]     generate a diagram (blank query uses the default)
  /quick             list quick questions
  /quick <n>         send quick question n
  /search <query>    instant answer with sources
  /articles [tag]    list articles, optionally by tag
  /health            check the backend
  /help              show this help
  /quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Image(String),
    ListQuick,
    Quick(usize),
    Search(String),
    Articles(Option<String>),
    Health,
    Help,
    Quit,
}

/// Parses one input line. Returns `Ok(None)` for a blank line.
///
/// Quick question numbers are 1-based on the command line and 0-based in the
/// returned command.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let cmd = match name {
        "image" => Command::Image(arg.to_string()),
        "quick" if arg.is_empty() => Command::ListQuick,
        "quick" => {
            let n: usize = arg
                .parse()
                .with_context(|| format!("not a question number: {arg}"))?;
            if n == 0 {
                bail!("question numbers start at 1");
            }
            Command::Quick(n - 1)
        }
        "search" if arg.is_empty() => bail!("usage: /search <query>"),
        "search" => Command::Search(arg.to_string()),
        "articles" => Command::Articles((!arg.is_empty()).then(|| arg.to_string())),
        "health" => Command::Health,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command: /{other} (try /help)"),
    };
    Ok(Some(cmd))
}
