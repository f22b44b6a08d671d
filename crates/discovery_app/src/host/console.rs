use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use discovery_core::{AppViewModel, Destination, Facet, FeedKind, FeedView, LoadStatus, Msg};
use feed_logging::feed_info;

use super::effects::{Navigator, Notifier};

pub const HELP: &str = "\
commands:
  focus [search]          focus the discovery (or search) view
  source [search] <id>    pick a source for discovery (or for the next search)
  type|region|status|sort <value>   (\"\" picks the empty value)
  search <keyword>        submit a search
  more [search]           load the next page
  retry [search]          reload after a failure
  open <item-key>         open an item
  settings                open plugin settings
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

fn feed_arg(arg: &str) -> Option<FeedKind> {
    match arg {
        "" | "discovery" => Some(FeedKind::Discovery),
        "search" => Some(FeedKind::Search),
        _ => None,
    }
}

/// `""` selects the empty value, which plugins use for "all".
fn facet_value(arg: &str) -> &str {
    if arg == "\"\"" {
        ""
    } else {
        arg
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let single = |msg: Msg| -> Result<Command, String> { Ok(Command::Dispatch(vec![msg])) };
    let feed = || feed_arg(rest).ok_or_else(|| format!("unknown feed {rest:?}"));

    match word {
        "" => Ok(Command::Dispatch(Vec::new())),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "focus" => single(Msg::ViewFocused(feed()?)),
        "more" => single(Msg::LoadMore(feed()?)),
        "retry" => single(Msg::Retry(feed()?)),
        "settings" => single(Msg::PluginSettingsOpened),
        "open" if !rest.is_empty() => single(Msg::ItemSelected(rest.to_string())),
        "search" if !rest.is_empty() => Ok(Command::Dispatch(vec![
            Msg::KeywordChanged(rest.to_string()),
            Msg::SearchSubmitted,
        ])),
        "source" => {
            let (feed, plugin) = match rest.split_once(char::is_whitespace) {
                Some(("search", plugin)) => (FeedKind::Search, plugin.trim()),
                _ => (FeedKind::Discovery, rest),
            };
            if plugin.is_empty() {
                return Err("source needs a plugin id".to_string());
            }
            single(Msg::SourceChanged {
                feed,
                plugin: plugin.to_string(),
            })
        }
        other => match Facet::parse(other) {
            Some(facet) if !rest.is_empty() => single(Msg::FacetChanged {
                facet,
                value: facet_value(rest).to_string(),
            }),
            Some(facet) => Err(format!("{} needs a value", facet.as_str())),
            None => Err(format!("unknown command {other:?}")),
        },
    }
}

fn status_text(feed: &FeedView) -> &'static str {
    match feed.status {
        LoadStatus::Default => "idle",
        LoadStatus::Pending => "loading",
        LoadStatus::Fulfilled => "ready",
        LoadStatus::Rejected => "failed",
    }
}

fn render_feed(out: &mut String, title: &str, feed: &FeedView) {
    let _ = writeln!(out, "[{title}] {} ({} items)", status_text(feed), feed.items.len());
    for item in &feed.items {
        let _ = write!(out, "  {}  {}", item.key(), item.title);
        if let Some(latest) = &item.latest {
            let _ = write!(out, "  ({latest})");
        }
        out.push('\n');
    }
    if feed.can_load_more {
        out.push_str("  ... more\n");
    }
}

pub fn render(view: &AppViewModel, screen: Screen) -> String {
    let mut out = String::new();
    let choices: Vec<_> = view
        .source
        .choices
        .iter()
        .map(|choice| format!("{}={}", choice.value, choice.label))
        .collect();
    let _ = writeln!(out, "sources: {}", choices.join(", "));

    match screen {
        Screen::Discovery => {
            let _ = write!(out, "source: {}", view.source.discovery_label);
            for control in &view.facets {
                let _ = write!(out, " | {}: {}", control.facet.as_str(), control.label);
            }
            out.push('\n');
            render_feed(&mut out, "discovery", &view.discovery);
        }
        Screen::Search => {
            let _ = writeln!(
                out,
                "search {:?} on {}",
                view.keyword, view.source.search_label
            );
            render_feed(&mut out, "search", &view.search);
        }
    }
    out
}

/// Which list the console is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Discovery,
    Search,
}

/// Prints transitions and remembers which list to show.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    screen: Arc<Mutex<Screen>>,
}

impl ConsoleNavigator {
    pub fn new(screen: Arc<Mutex<Screen>>) -> Self {
        Self { screen }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, destination: &Destination) {
        feed_info!("navigate {:?}", destination);
        match destination {
            Destination::Search { keyword } => {
                if let Ok(mut screen) = self.screen.lock() {
                    *screen = Screen::Search;
                }
                println!("-> Search {keyword:?}");
            }
            Destination::Detail { item } => println!("-> Detail {item}"),
            Destination::PluginSettings => println!("-> PluginSettings"),
        }
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, feed: FeedKind, message: &str) {
        eprintln!("! {} failed: {}", feed.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use discovery_core::{FacetControl, Item, OptionItem, SourcePickerView};

    use super::*;

    #[test]
    fn parses_facet_and_source_commands() {
        assert_eq!(
            parse_command("sort pop"),
            Ok(Command::Dispatch(vec![Msg::FacetChanged {
                facet: Facet::Sort,
                value: "pop".to_string()
            }]))
        );
        assert_eq!(
            parse_command("source search beta"),
            Ok(Command::Dispatch(vec![Msg::SourceChanged {
                feed: FeedKind::Search,
                plugin: "beta".to_string()
            }]))
        );
        assert_eq!(
            parse_command("source alpha"),
            Ok(Command::Dispatch(vec![Msg::SourceChanged {
                feed: FeedKind::Discovery,
                plugin: "alpha".to_string()
            }]))
        );
    }

    #[test]
    fn quoted_empty_value_selects_the_all_option() {
        assert_eq!(
            parse_command("region \"\""),
            Ok(Command::Dispatch(vec![Msg::FacetChanged {
                facet: Facet::Region,
                value: String::new()
            }]))
        );
    }

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            parse_command("  search one piece "),
            Ok(Command::Dispatch(vec![
                Msg::KeywordChanged("one piece".to_string()),
                Msg::SearchSubmitted
            ]))
        );
    }

    #[test]
    fn feed_arguments_default_to_discovery() {
        assert_eq!(
            parse_command("more"),
            Ok(Command::Dispatch(vec![Msg::LoadMore(FeedKind::Discovery)]))
        );
        assert_eq!(
            parse_command("retry search"),
            Ok(Command::Dispatch(vec![Msg::Retry(FeedKind::Search)]))
        );
        assert!(parse_command("more sideways").is_err());
    }

    #[test]
    fn rejects_incomplete_and_unknown_commands() {
        assert!(parse_command("sort").is_err());
        assert!(parse_command("source").is_err());
        assert!(parse_command("dance").is_err());
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Dispatch(Vec::new())));
    }

    #[test]
    fn render_shows_facet_labels_and_items() {
        let mut item = Item::new("alpha", "1", "First");
        item.latest = Some("ch. 12".to_string());
        let view = AppViewModel {
            source: SourcePickerView {
                discovery_label: "Alpha".to_string(),
                search_label: "Alpha".to_string(),
                choices: vec![OptionItem::new("alpha", "Alpha")],
            },
            facets: vec![FacetControl {
                facet: Facet::Sort,
                label: "Popular".to_string(),
                options: Vec::new(),
            }],
            discovery: FeedView {
                status: LoadStatus::Fulfilled,
                loading: false,
                can_load_more: true,
                items: vec![item],
            },
            ..AppViewModel::default()
        };

        let text = render(&view, Screen::Discovery);
        assert!(text.contains("source: Alpha | sort: Popular"));
        assert!(text.contains("alpha&1  First  (ch. 12)"));
        assert!(text.contains("[discovery] ready (1 items)"));
        assert!(text.contains("... more"));
    }
}
