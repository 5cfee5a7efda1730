//! The subject side of the pattern.
//!
//! [`WeatherStation`] keeps the latest [`Reading`] and an ordered registry of
//! observers. Every operation takes `&self`: state sits behind `Cell`/`RefCell`
//! so an observer holding a (weak) handle to the station may register or
//! unregister observers while it is being notified. Such changes apply from the
//! next round on, because each round works on a snapshot of the registry.
//!
//! The station holds `Rc` observer handles, so it is neither `Send` nor
//! `Sync`: the compiler rules out sharing it across threads, and all access
//! happens on the thread that built it.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::{
    model::Reading,
    observer::{Observer, SharedObserver, same_observer},
    validate::{ValidationError, validate_measurements},
};

/// An observer that returned an error during a notification round.
#[derive(Debug)]
pub struct ObserverFailure {
    pub observer: String,
    pub error: anyhow::Error,
}

impl fmt::Display for ObserverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.observer, self.error)
    }
}

/// Outcome of one notification round. A failing observer does not stop the
/// round; it is recorded here and the remaining observers are still notified.
#[derive(Debug, Default)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failures: Vec<ObserverFailure>,
}

impl NotifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Observers the round tried to reach, successful or not.
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

/// Registry entry. The name is read once at registration, so it can still be
/// reported while the observer itself is borrowed.
#[derive(Debug, Clone)]
struct Registration {
    name: String,
    observer: SharedObserver,
}

#[derive(Debug, Default)]
pub struct WeatherStation {
    current: Cell<Option<Reading>>,
    observers: RefCell<Vec<Registration>>,
}

impl WeatherStation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `observer` to the registry. Registering the same handle twice
    /// means it is notified twice per round.
    pub fn register_observer(&self, observer: SharedObserver) {
        let name = match observer.try_borrow() {
            Ok(observer) => observer.name().to_string(),
            Err(_) => "<unnamed>".to_string(),
        };

        let mut observers = self.observers.borrow_mut();
        tracing::debug!(observer = %name, registered = observers.len() + 1, "observer registered");
        observers.push(Registration { name, observer });
    }

    /// Remove every registry entry that is `observer`, returning how many were
    /// dropped. Unknown observers are ignored, so repeated calls are harmless.
    pub fn unregister_observer<O: Observer + ?Sized>(&self, observer: &Rc<RefCell<O>>) -> usize {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|entry| !same_observer(&entry.observer, observer));

        let removed = before - observers.len();
        if removed > 0 {
            tracing::debug!(removed, registered = observers.len(), "observer unregistered");
        }
        removed
    }

    pub fn is_registered<O: Observer + ?Sized>(&self, observer: &Rc<RefCell<O>>) -> bool {
        self.observers.borrow().iter().any(|entry| same_observer(&entry.observer, observer))
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Validate and store a new reading, then notify every registered observer
    /// in registration order. An invalid reading leaves the station untouched
    /// and nobody is notified.
    pub fn set_measurements(
        &self,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> Result<NotifyReport, ValidationError> {
        if let Err(err) = validate_measurements(temperature, humidity, wind_speed) {
            tracing::warn!(%err, "rejected measurements");
            return Err(err);
        }

        let reading = Reading { temperature, humidity, wind_speed };
        self.current.set(Some(reading));

        Ok(self.notify(reading))
    }

    /// The latest accepted reading, or `None` before the first one.
    pub fn get_measurements(&self) -> Option<Reading> {
        self.current.get()
    }

    /// Send the current reading to all observers again. `None` if nothing
    /// has been measured yet.
    pub fn notify_observers(&self) -> Option<NotifyReport> {
        self.current.get().map(|reading| self.notify(reading))
    }

    fn notify(&self, reading: Reading) -> NotifyReport {
        let snapshot: Vec<Registration> = self.observers.borrow().clone();
        tracing::debug!(observers = snapshot.len(), ?reading, "notifying observers");

        let mut report = NotifyReport::default();
        for Registration { name, observer } in snapshot {
            // A busy observer means it triggered this round from inside its own update.
            let Ok(mut observer) = observer.try_borrow_mut() else {
                tracing::warn!(observer = %name, "skipping observer that is already being notified");
                report.failures.push(ObserverFailure {
                    observer: name,
                    error: anyhow::anyhow!("observer is already handling a notification"),
                });
                continue;
            };

            match observer.update(&reading) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    tracing::warn!(observer = %name, error = %format!("{error:#}"), "observer failed");
                    report.failures.push(ObserverFailure { observer: name, error });
                }
            }
        }

        report
    }
}
