//! Scheduler: отложенные continuations поверх simulation clock
//!
//! # Архитектура
//!
//! **FixedUpdate** → `run_scheduled_actions` (exclusive, последняя система тика)
//!   ├─ clock.frozen → ничего не срабатывает (время стоит)
//!   ├─ scheduler.advance(delta) → все due continuations (due_at, затем id)
//!   └─ continuation заморозила время → остаток тика выбрасывается
//!
//! Continuation = `FnOnce(&mut World)`: выполняется целиком, никто её не прерывает.
//! Классы (`TimerClass`) дают "replace pending" семантику: новый transient
//! status clear отменяет предыдущий.

use bevy::prelude::*;

use crate::logger;

// Floating drift: 180 × (1/60) может дать 2.9999999
const DUE_EPSILON: f64 = 1e-9;

/// Resource: simulation clock frozen (только terminal переходы сессии)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SimulationClock {
    pub frozen: bool,
}

/// Класс таймера (для cancel/replace по классу)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TimerClass {
    /// Auto-clear transient status сообщения
    StatusMessage,
    /// Второй шаг respawn sequence
    Respawn,
}

/// Handle для отмены конкретной continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub type Continuation = Box<dyn FnOnce(&mut World) + Send + Sync>;

/// Due continuation, извлечённая из очереди
pub struct ScheduledAction {
    pub handle: TimerHandle,
    pub class: Option<TimerClass>,
    pub due_at: f64,
    pub action: Continuation,
}

impl std::fmt::Debug for ScheduledAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledAction")
            .field("handle", &self.handle)
            .field("class", &self.class)
            .field("due_at", &self.due_at)
            .finish_non_exhaustive()
    }
}

/// Resource: очередь отложенных continuations
#[derive(Resource, Default)]
pub struct Scheduler {
    /// Simulation time (секунды с начала сессии, только пока не frozen)
    now: f64,
    next_id: u64,
    pending: Vec<ScheduledAction>,
}

impl Scheduler {
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(
        &mut self,
        delay_secs: f32,
        action: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) -> TimerHandle {
        self.push(None, delay_secs, Box::new(action))
    }

    pub fn schedule_with_class(
        &mut self,
        class: TimerClass,
        delay_secs: f32,
        action: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) -> TimerHandle {
        self.push(Some(class), delay_secs, Box::new(action))
    }

    /// Отменяет pending continuation того же класса и ставит новую
    pub fn schedule_replacing(
        &mut self,
        class: TimerClass,
        delay_secs: f32,
        action: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) -> TimerHandle {
        self.cancel_class(class);
        self.push(Some(class), delay_secs, Box::new(action))
    }

    /// true: continuation была pending и отменена
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        self.pending.len() != before
    }

    /// Сколько continuations отменено
    pub fn cancel_class(&mut self, class: TimerClass) -> usize {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.class != Some(class));
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|entry| entry.handle == handle)
    }

    pub fn has_pending_class(&self, class: TimerClass) -> bool {
        self.pending.iter().any(|entry| entry.class == Some(class))
    }

    /// Сдвигает часы и забирает все due continuations.
    /// Порядок: due_at, затем порядок планирования.
    pub fn advance(&mut self, delta_secs: f64) -> Vec<ScheduledAction> {
        self.now += delta_secs;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|entry| entry.due_at <= now + DUE_EPSILON);
        self.pending = pending;

        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.handle.cmp(&b.handle)));
        due
    }

    fn push(&mut self, class: Option<TimerClass>, delay_secs: f32, action: Continuation) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        self.pending.push(ScheduledAction {
            handle,
            class,
            due_at: self.now + f64::from(delay_secs.max(0.0)),
            action,
        });

        handle
    }
}

/// Exclusive system: выполнить due continuations (последняя система FixedUpdate)
pub fn run_scheduled_actions(world: &mut World) {
    let delta = world.resource::<Time<Fixed>>().delta_secs_f64();
    run_scheduled_for(world, delta);
}

/// Один шаг scheduler'а на `delta_secs` (без зависимости от `Time`)
pub fn run_scheduled_for(world: &mut World, delta_secs: f64) {
    if is_frozen(world) {
        return;
    }

    let due = world.resource_mut::<Scheduler>().advance(delta_secs);
    let total = due.len();

    for (index, scheduled) in due.into_iter().enumerate() {
        (scheduled.action)(world);

        if is_frozen(world) {
            let skipped = total - index - 1;
            if skipped > 0 {
                logger::log(&format!(
                    "⏸️ Simulation frozen mid-tick → {} scheduled continuation(s) dropped",
                    skipped
                ));
            }
            return;
        }
    }
}

fn is_frozen(world: &World) -> bool {
    world
        .get_resource::<SimulationClock>()
        .map(|clock| clock.frozen)
        .unwrap_or(false)
}

pub struct SchedulerPlugin;

impl Plugin for SchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scheduler>().init_resource::<SimulationClock>();
    }
}
