use std::io::BufRead;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use discovery_core::{update, AppState, DiscoveryStore, FeedKind, Msg};
use discovery_engine::EngineHandle;
use feed_logging::{feed_debug, feed_info};

use super::config::AppConfig;
use super::console::{self, Command, ConsoleNavigator, ConsoleNotifier, Screen};
use super::effects::EffectRunner;
use super::logging;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

enum Input {
    Line(String),
    Closed,
}

pub fn run_app(config_path: &Path) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    logging::initialize(
        config.log_destination,
        feed_logging::parse_level(&config.log_level),
    );
    feed_info!(
        "loaded {} plugins from {}",
        config.plugins.len(),
        config_path.display()
    );

    let engine = EngineHandle::with_http(config.fetch_settings(), config.endpoints())
        .context("building http client")?;
    let screen = Arc::new(Mutex::new(Screen::default()));
    let mut runner = EffectRunner::new(
        engine,
        Box::new(ConsoleNavigator::new(screen.clone())),
        Box::new(ConsoleNotifier),
    );
    let mut host = Host {
        state: AppState::new(config.registry()),
        screen,
    };

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });

    println!("{}", console::HELP);
    host.dispatch(&mut runner, Msg::ViewFocused(FeedKind::Discovery));
    host.render_if_dirty();

    loop {
        while let Some(msg) = runner.poll() {
            host.dispatch(&mut runner, msg);
        }
        host.render_if_dirty();

        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => match console::parse_command(&line) {
                Ok(Command::Dispatch(msgs)) => {
                    for msg in msgs {
                        host.dispatch(&mut runner, msg);
                    }
                }
                Ok(Command::Help) => println!("{}", console::HELP),
                Ok(Command::Quit) => break,
                Err(err) => eprintln!("{err}"),
            },
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                // Scripted input: let outstanding fetches land before exiting.
                let deadline = Instant::now() + config.fetch_settings().request_timeout;
                host.drain(&mut runner, deadline);
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    feed_info!("shutting down");
    Ok(())
}

struct Host {
    state: AppState,
    screen: Arc<Mutex<Screen>>,
}

impl Host {
    fn dispatch(&mut self, runner: &mut EffectRunner, msg: Msg) {
        feed_debug!("dispatch {:?}", msg);
        if let Msg::ViewFocused(feed) = &msg {
            self.set_screen(match feed {
                FeedKind::Discovery => Screen::Discovery,
                FeedKind::Search => Screen::Search,
            });
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        runner.run(effects);
    }

    fn set_screen(&self, next: Screen) {
        if let Ok(mut screen) = self.screen.lock() {
            *screen = next;
        }
    }

    fn current_screen(&self) -> Screen {
        self.screen
            .lock()
            .map(|screen| *screen)
            .unwrap_or_default()
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            print!("{}", console::render(&self.state.view(), self.current_screen()));
        }
    }

    fn is_loading(&self) -> bool {
        [FeedKind::Discovery, FeedKind::Search]
            .into_iter()
            .any(|feed| self.state.feed(feed).is_loading())
    }

    fn drain(&mut self, runner: &mut EffectRunner, deadline: Instant) {
        while self.is_loading() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if let Some(msg) = runner.wait(deadline - now) {
                self.dispatch(runner, msg);
                self.render_if_dirty();
            }
        }
    }
}
