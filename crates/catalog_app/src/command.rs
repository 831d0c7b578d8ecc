use catalog_core::{CreateForm, EditForm, Msg, ProductId, SortKey};

pub const HELP: &str = "\
Commands:
  reload                       fetch the catalog again
  search [text]                filter by title (empty clears)
  sort id|title|price          sort by column; repeat to flip direction
  page <n>                     go to page n
  size <n>                     items per page
  show <id>                    product detail
  close                        close the detail view
  export                       write the current page as CSV
  create <title> | <price> | <description> | <category id> | <image urls...>
  edit <id> <title> | <price> | <description>
  help                         this text
  quit                         leave";

/// What one line of console input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

/// Parse a console line. `today` is the ISO date used for export filenames.
pub fn parse_command(line: &str, today: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Dispatch(Msg::NoOp)),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "reload" => Msg::LoadRequested,
        "search" => Msg::SearchChanged(rest.to_string()),
        "sort" => Msg::SortToggled(parse_sort_key(rest)?),
        "page" => Msg::PageRequested(parse_number(rest, "page")?),
        "size" => Msg::PageSizeChanged(parse_number(rest, "size")?),
        "show" => Msg::DetailRequested(parse_number(rest, "show")?),
        "close" => Msg::DetailClosed,
        "export" => Msg::ExportRequested {
            date: today.to_string(),
        },
        "create" => Msg::CreateSubmitted(parse_create(rest)?),
        "edit" => {
            let (id, form) = parse_edit(rest)?;
            Msg::EditSubmitted { id, form }
        }
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Command::Dispatch(msg))
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    match raw.to_ascii_lowercase().as_str() {
        "id" => Ok(SortKey::Id),
        "title" => Ok(SortKey::Title),
        "price" => Ok(SortKey::Price),
        other => Err(format!("cannot sort by {other:?}; use id, title or price")),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, verb: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("`{verb}` expects a number, got {raw:?}"))
}

fn split_fields(raw: &str, expected: usize, usage: &str) -> Result<Vec<String>, String> {
    let fields: Vec<String> = raw.split('|').map(|field| field.trim().to_string()).collect();
    if fields.len() != expected {
        return Err(format!("usage: {usage}"));
    }
    Ok(fields)
}

fn parse_create(raw: &str) -> Result<CreateForm, String> {
    let mut fields = split_fields(
        raw,
        5,
        "create <title> | <price> | <description> | <category id> | <image urls...>",
    )?
    .into_iter();
    let mut next = || fields.next().unwrap_or_default();
    Ok(CreateForm {
        title: next(),
        price: next(),
        description: next(),
        category_id: next(),
        images: next().split_whitespace().collect::<Vec<_>>().join("\n"),
    })
}

fn parse_edit(raw: &str) -> Result<(ProductId, EditForm), String> {
    let usage = "edit <id> <title> | <price> | <description>";
    let (id, rest) = raw
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("usage: {usage}"))?;
    let id = parse_number(id, "edit")?;
    let mut fields = split_fields(rest, 3, usage)?.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    Ok((
        id,
        EditForm {
            title: next(),
            price: next(),
            description: next(),
        },
    ))
}
