#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid: sysinfo::get_current_pid().ok(),
            start_time: Instant::now(),
            peak_memory: Mutex::new(0),
            enabled,
        }
    }

    fn snapshot(&self) -> Option<SystemStats> {
        if !self.enabled {
            return None;
        }
        let pid = self.pid?;

        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let process = system.process(pid)?;
        let memory_mb = process.memory() / 1024 / 1024; // bytes to MB

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(SystemStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境的空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
