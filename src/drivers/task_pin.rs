//! Core-pinned thread spawning for ESP32-S3 dual-core.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::spawn` creates a
//! FreeRTOS task pinned to a specific CPU core with explicit priority
//! and stack size. On non-ESP targets, falls back to a plain named thread.
//!
//! # ESP-IDF Threading Model
//!
//! ESP-IDF implements `std::thread` via pthreads, which are thin wrappers
//! around FreeRTOS tasks. `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` call from
//! the calling thread, so the config→spawn pair must not be interleaved
//! with other thread creation on the same thread.

use crate::config::LayerConfig;

/// CPU core identifiers for the ESP32-S3 Xtensa LX7 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU) — protocol stacks and the audio player.
    Pro = 0,
    /// Core 1 (APP_CPU) — GUI toolkit and layer logic.
    App = 1,
}

/// How to spawn a worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    /// Null-terminated task name (e.g. `"announce\0"`).
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
}

impl TaskSpec {
    /// Announcement worker task as configured for the layer.
    pub fn announcer(config: &LayerConfig) -> Self {
        Self {
            priority: config.worker_priority,
            stack_kb: config.worker_stack_kb,
            ..Self::default()
        }
    }

    fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            name: "announce\0",
            core: Core::Pro,
            priority: 2,
            stack_kb: 4,
        }
    }
}

/// Spawn a thread pinned to `spec.core` with explicit priority and stack.
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    spec: &TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> std::thread::JoinHandle<()> {
    unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = spec.core as i32;
        cfg.prio = spec.priority as i32;
        cfg.stack_size = (spec.stack_kb * 1024) as i32;
        cfg.thread_name = spec.name.as_ptr() as *const _;
        let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
        assert!(
            ret == esp_idf_sys::ESP_OK as i32,
            "esp_pthread_set_cfg failed: {ret}"
        );
    }

    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        spec.display_name(),
        spec.core,
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(spec.display_name().into())
        .spawn(f)
        .expect("spawn_on_core: thread creation failed")
}

/// Host fallback — ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    spec: &TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> std::thread::JoinHandle<()> {
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        spec.display_name(),
        spec.stack_kb
    );

    // Host threads need more headroom than the FreeRTOS task does.
    let stack_kb = spec.stack_kb.max(64);
    std::thread::Builder::new()
        .name(spec.display_name().into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .expect("spawn_on_core(sim): thread creation failed")
}
