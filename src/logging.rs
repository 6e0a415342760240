use std::{
    sync::{Arc, Mutex, MutexGuard, OnceLock, RwLock},
    time::{Duration, Instant},
};

use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

// default configuration
const DEFAULT_DECAY: Duration = Duration::from_secs(5);
const DEFAULT_MAX_VISIBLE: usize = 3;

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(log::Level::Warn, DEFAULT_DECAY, DEFAULT_MAX_VISIBLE))
}

/// Installs the app logger. Calling it again only changes the minimum level.
pub fn init(level: log::Level) {
    let logger = get_logger();
    logger.set_min_level(level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub level: log::Level,
    pub pushed: Instant,
    pub message: String,
    pub source: String,
}

impl Message {
    pub fn format(&self) -> String {
        format!("[{}] {} -> {}", self.level, self.source, self.message)
    }
}

#[derive(Default)]
struct Logs {
    logs: [Vec<Message>; 5], // there are 5 levels
}

impl Logs {
    fn push(&mut self, message: Message) {
        self.logs[message.level as usize - 1].insert(0, message);
    }

    fn clear_old(&mut self, decay: Duration) {
        let now = Instant::now();
        for level in self.logs.iter_mut() {
            level.retain(|msg| now.duration_since(msg.pushed) < decay);
        }
    }
}

/// Logger keeping recent messages in memory, most severe first, so the terminal can show them.
pub struct AppLogger {
    min_level: Arc<RwLock<log::Level>>,
    pub decay: Duration,
    pub max_visible: usize,
    logs: Arc<Mutex<Logs>>,
}

impl AppLogger {
    pub fn new(min_level: log::Level, decay: Duration, max_visible: usize) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            decay,
            max_visible,
            logs: Arc::new(Mutex::new(Logs::default())),
        }
    }

    pub fn min_level(&self) -> log::Level {
        *self.min_level.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_min_level(&self, level: log::Level) {
        *self.min_level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }

    fn borrow_mut_logs(&self) -> MutexGuard<'_, Logs> {
        // a panic while logging leaves the logs usable, we just might lose a message
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Messages younger than the decay window, errors first.
    pub fn get_logs(&self) -> Vec<Message> {
        let mut logs = self.borrow_mut_logs();
        logs.clear_old(self.decay);
        logs.logs.iter().flatten().cloned().collect()
    }

    /// All messages regardless of age, errors first.
    pub fn drain(&self) -> Vec<Message> {
        let mut logs = self.borrow_mut_logs();
        logs.logs.iter_mut().flat_map(std::mem::take).collect()
    }

    pub fn visible(&self) -> Vec<Message> {
        let mut logs = self.get_logs();
        logs.truncate(self.max_visible);
        logs
    }

    pub fn switch_debug(&self) {
        if self.min_level() == log::Level::Debug {
            self.set_min_level(log::Level::Warn);
        } else {
            self.set_min_level(log::Level::Debug);
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.borrow_mut_logs().push(Message {
                level: record.level(),
                pushed: Instant::now(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            });
        }
    }

    fn flush(&self) {}
}
