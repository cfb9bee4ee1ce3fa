use std::path::Path;

use flexi_logger::Cleanup;
use flexi_logger::Criterion;
use flexi_logger::FileSpec;
use flexi_logger::Logger;
use flexi_logger::LoggerHandle;
use flexi_logger::Naming;
use flexi_logger::WriteMode;

const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Starts a rotating file logger. Everything goes to a file because stderr
/// belongs to the terminal UI while the app runs.
///
/// The returned handle must stay alive for the lifetime of the process.
pub fn init(log_dir: &Path) -> Result<LoggerHandle, String> {
	std::fs::create_dir_all(log_dir)
		.map_err(|err| format!("failed to create log directory '{}': {err}", log_dir.display()))?;

	Logger::try_with_env_or_str(default_level())
		.map_err(|err| format!("invalid log level: {err}"))?
		.log_to_file(FileSpec::default().directory(log_dir).basename("dayk"))
		.rotate(
			Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
			Naming::Numbers,
			Cleanup::KeepLogFiles(MAX_LOG_FILES),
		)
		.write_mode(WriteMode::BufferAndFlush)
		.append()
		.start()
		.map_err(|err| format!("failed to start logger: {err}"))
}

fn default_level() -> &'static str {
	if cfg!(debug_assertions) {
		"debug"
	} else {
		"info"
	}
}
