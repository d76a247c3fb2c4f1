//! # Notifications
//!
//! Transient status toasts. At most one is live; a new request replaces the
//! current one instead of stacking.
//!
//! ```text
//! notify ──► Entering ──+100ms──► Visible ──until +4000ms──► Leaving ──+300ms──► Gone
//!    ▲                                                                           │
//!    └──── a new notify() at any phase jumps the live toast straight to Gone ────┘
//! ```
//!
//! Phase changes are driven by timers in a [`Scheduler`]. Replacing a toast
//! cancels its timers, and each timer also carries the id of the toast it was
//! created for, so a late timer can never move a newer toast.

use chrono::{DateTime, Local, Utc};
use log::debug;

use crate::core::schedule::{Millis, Scheduler, TaskId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Unknown names fall back to `Info`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToastPhase {
    /// Attached but still off-screen so the slide-in can animate.
    Entering,
    Visible,
    /// Sliding out.
    Leaving,
    Gone,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub phase: ToastPhase,
    /// Virtual time of the `notify` call.
    pub started: Millis,
}

impl Notification {
    /// Wall-clock creation time in local `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        self.created_at.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    /// Virtual milliseconds since `notify`.
    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started)
    }
}

/// Phase durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub settle: Millis,
    pub hold: Millis,
    pub exit: Millis,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            settle: 100,
            hold: 4_000,
            exit: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PhaseStep {
    toast: u64,
    phase: ToastPhase,
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    live: Option<Notification>,
    timers: Scheduler<PhaseStep>,
    pending: Vec<TaskId>,
    next_id: u64,
    timings: ToastTimings,
}

impl NotificationQueue {
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            timings,
            ..Default::default()
        }
    }

    /// Show `message`, replacing whatever is live. Returns the toast id.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Millis) -> u64 {
        if let Some(old) = self.live.take() {
            debug!(
                "Toast {} replaced {}ms in ({:?})",
                old.id,
                old.age(now),
                old.phase
            );
        }
        for id in self.pending.drain(..) {
            self.timers.cancel(id);
        }

        self.next_id += 1;
        let id = self.next_id;
        let message = message.into();
        debug!("Toast {} [{}]: {}", id, severity.label(), message);

        let t = self.timings;
        self.pending = vec![
            self.timers.after(now, t.settle, PhaseStep { toast: id, phase: ToastPhase::Visible }),
            self.timers.after(now, t.hold, PhaseStep { toast: id, phase: ToastPhase::Leaving }),
            self.timers.after(
                now,
                t.hold.saturating_add(t.exit),
                PhaseStep { toast: id, phase: ToastPhase::Gone },
            ),
        ];

        self.live = Some(Notification {
            id,
            message,
            severity,
            created_at: Utc::now(),
            phase: ToastPhase::Entering,
            started: now,
        });
        id
    }

    /// Apply every phase change due by `now`. Returns true if anything moved.
    pub fn advance(&mut self, now: Millis) -> bool {
        let mut changed = false;
        for (task, step) in self.timers.advance(now) {
            self.pending.retain(|id| *id != task);

            let Some(live) = self.live.as_mut() else {
                continue;
            };
            // Phases only move forward, and only for the toast that owns the timer
            if live.id != step.toast || step.phase <= live.phase {
                continue;
            }

            live.phase = step.phase;
            changed = true;
            if step.phase == ToastPhase::Gone {
                debug!("Toast {} detached after {}ms", live.id, live.age(now));
                self.live = None;
            }
        }
        changed
    }

    /// The attached toast, if any (never in phase `Gone`).
    pub fn live(&self) -> Option<&Notification> {
        self.live.as_ref()
    }

    /// Next time `advance` has work to do.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Drop the live toast without waiting for its exit.
    pub fn dismiss(&mut self) {
        // Every timer belongs to the live toast
        self.timers.cancel_all();
        self.pending.clear();
        self.live = None;
    }
}
