//! 日志模块：env_logger 控制台彩色输出 + 同步写入日志文件（按大小轮转）
use env_logger::fmt::Formatter;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter, Record};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

const LOG_DIR_ENV: &str = "LOG_DIR";
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
const LOG_FILE_NAME: &str = "eth-chain-client.log";
const LOG_MAX_SIZE_MB: u64 = 10;
const LOG_MAX_ROTATIONS: usize = 5;

static INIT_LOGGER: Once = Once::new();
static FILE_SINK: Mutex<Option<File>> = Mutex::new(None);

/// 从环境变量解析出的日志设置
#[derive(Debug, Clone)]
struct LogSettings {
    dir: PathBuf,
    level: LevelFilter,
}

impl LogSettings {
    fn from_env() -> Self {
        let dir = std::env::var(LOG_DIR_ENV).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
        let level = match std::env::var(LOG_LEVEL_ENV) {
            Ok(raw) => parse_level(&raw).unwrap_or_else(|| {
                eprintln!("⚠️ 无效日志级别「{}」，使用默认 {}", raw, DEFAULT_LOG_LEVEL);
                DEFAULT_LOG_LEVEL
            }),
            Err(_) => DEFAULT_LOG_LEVEL,
        };
        Self {
            dir: PathBuf::from(dir),
            level,
        }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "OFF" => Some(LevelFilter::Off),
        "TRACE" => Some(LevelFilter::Trace),
        "DEBUG" => Some(LevelFilter::Debug),
        "INFO" => Some(LevelFilter::Info),
        "WARN" => Some(LevelFilter::Warn),
        "ERROR" => Some(LevelFilter::Error),
        _ => None,
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[91m",
        Level::Warn => "\x1b[93m",
        Level::Info => "\x1b[92m",
        Level::Debug => "\x1b[96m",
        Level::Trace => "\x1b[95m",
    }
}

/// 打开日志文件作为文件输出；失败时只保留控制台输出
fn open_file_sink(settings: &LogSettings) -> bool {
    if let Err(e) = fs::create_dir_all(&settings.dir) {
        eprintln!("❌ 创建日志目录失败: {}", e);
        return false;
    }
    if let Err(e) = rotate_logs(&settings.dir, LOG_FILE_NAME) {
        eprintln!("⚠️ 日志轮转失败: {}", e);
    }
    match File::create(settings.file_path()) {
        Ok(f) => {
            if let Ok(mut sink) = FILE_SINK.lock() {
                *sink = Some(f);
            }
            true
        }
        Err(e) => {
            eprintln!("❌ 创建日志文件失败: {}", e);
            false
        }
    }
}

fn write_to_file(line: &str) {
    if let Ok(mut sink) = FILE_SINK.lock() {
        if let Some(file) = sink.as_mut() {
            // 文件写入失败不影响控制台
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// 初始化日志（全局只生效一次）
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let settings = LogSettings::from_env();
        let file_enabled = open_file_sink(&settings);

        let mut builder = Builder::from_default_env();
        builder
            .filter(None, settings.level)
            .filter(Some("ethers_providers"), LevelFilter::Warn)
            .filter(Some("hyper"), LevelFilter::Warn)
            .filter(Some("reqwest"), LevelFilter::Warn)
            .write_style(WriteStyle::Auto)
            .format(move |f: &mut Formatter, record: &Record| {
                let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                let module = record.module_path().unwrap_or("unknown");

                if file_enabled {
                    write_to_file(&format!(
                        "[{}] [{:>5}] [{}] - {}\n",
                        now,
                        record.level(),
                        module,
                        record.args()
                    ));
                }

                writeln!(
                    f,
                    "[{}] [{}{:>5}\x1b[0m] [\x1b[31m{}\x1b[0m] - {}",
                    now,
                    level_color(record.level()),
                    record.level(),
                    module,
                    record.args()
                )
            })
            .target(Target::Stdout);

        match builder.try_init() {
            Ok(()) => log::info!(
                "✅ 日志系统初始化完成 | 级别: {} | 日志文件: {}",
                settings.level,
                settings.file_path().display()
            ),
            Err(e) => eprintln!("❌ 日志初始化失败: {}", e),
        }
    });
}

/// 日志文件超过阈值时依次后移：`x.log` → `x.log.1` → ... → `x.log.N`
fn rotate_logs(log_dir: &Path, log_file: &str) -> io::Result<()> {
    let log_path = log_dir.join(log_file);
    if !log_path.exists() {
        return Ok(());
    }

    let size_mb = fs::metadata(&log_path)?.len() / (1024 * 1024);
    if size_mb < LOG_MAX_SIZE_MB {
        return Ok(());
    }

    for i in (1..LOG_MAX_ROTATIONS).rev() {
        let src = log_dir.join(format!("{}.{}", log_file, i));
        if src.exists() {
            fs::rename(&src, log_dir.join(format!("{}.{}", log_file, i + 1)))?;
        }
    }
    fs::rename(&log_path, log_dir.join(format!("{}.1", log_file)))
}

// ==================== 便捷日志宏 ====================
#[macro_export]
macro_rules! log_trace { ($($arg:tt)*) => { log::trace!($($arg)*) }; }
#[macro_export]
macro_rules! log_debug { ($($arg:tt)*) => { log::debug!($($arg)*) }; }
#[macro_export]
macro_rules! log_info  { ($($arg:tt)*) => { log::info!($($arg)*) }; }
#[macro_export]
macro_rules! log_warn  { ($($arg:tt)*) => { log::warn!($($arg)*) }; }
#[macro_export]
macro_rules! log_error { ($($arg:tt)*) => { log::error!($($arg)*) }; }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn small_log_files_are_not_rotated() {
        let dir = std::env::temp_dir().join(format!("eth-chain-client-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("small.log");
        fs::write(&path, b"one line\n").unwrap();

        rotate_logs(&dir, "small.log").unwrap();

        assert!(path.exists());
        assert!(!dir.join("small.log.1").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
