//! Monthly quota for assistant calls.
//!
//! The counter belongs to one calendar month. It is reset to zero exactly when
//! the month of "today" differs from the stored period, and is otherwise only
//! ever incremented, once per completed call.

use anyhow::Result;
use time::Date;

use crate::error::QuotaExceeded;
use crate::model::{CalendarMonth, QuotaTier, UsageState, format_date};
use crate::store::{LocalStore, USAGE_KEY};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageDecision {
    Allowed { remaining: u32 },
    Denied(QuotaExceeded),
}

/// Result of running a call behind the meter.
#[derive(Debug)]
pub enum Metered<T, E> {
    /// Over the cap; the call was not made.
    Denied(QuotaExceeded),
    /// The call succeeded and one unit was consumed.
    Completed(T),
    /// The call failed; nothing was consumed.
    Failed(E),
}

pub struct UsageMeter {
    store: LocalStore,
    state: UsageState,
}

impl UsageMeter {
    pub fn load(store: LocalStore, today: Date) -> Result<Self> {
        let state = match store.get::<UsageState>(USAGE_KEY)? {
            Some(state) => state,
            None => {
                let state = UsageState::fresh(CalendarMonth::of(today));
                store.put(USAGE_KEY, &state)?;
                state
            }
        };
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &UsageState {
        &self.state
    }

    /// State for the window containing `today`, rolling over if needed.
    pub fn current(&mut self, today: Date) -> Result<&UsageState> {
        self.roll_over(CalendarMonth::of(today))?;
        Ok(&self.state)
    }

    /// Evaluate the cap for `today` without consuming anything.
    pub fn check(&mut self, tier: QuotaTier, today: Date) -> Result<UsageDecision> {
        self.roll_over(CalendarMonth::of(today))?;
        let cap = tier.monthly_cap();
        if self.state.count >= cap {
            return Ok(UsageDecision::Denied(self.exceeded(tier)));
        }
        Ok(UsageDecision::Allowed {
            remaining: cap - self.state.count,
        })
    }

    /// Count one successful call against the window containing `today`.
    pub fn record_success(&mut self, today: Date) -> Result<()> {
        self.roll_over(CalendarMonth::of(today))?;
        let next = UsageState {
            count: self.state.count.saturating_add(1),
            period: self.state.period,
        };
        self.commit(next)
    }

    /// Gate `call` on the quota: it runs only when allowed, and the counter
    /// moves only when it returns `Ok`.
    ///
    /// Once `call` has succeeded its value is always returned. If the counter
    /// cannot be saved it still advances in memory for this process.
    pub fn check_and_consume<T, E>(
        &mut self,
        tier: QuotaTier,
        today: Date,
        call: impl FnOnce() -> std::result::Result<T, E>,
    ) -> Result<Metered<T, E>> {
        if let UsageDecision::Denied(reason) = self.check(tier, today)? {
            tracing::info!(tier = %tier, used = reason.used, "assistant quota exhausted");
            return Ok(Metered::Denied(reason));
        }
        match call() {
            Ok(value) => {
                if let Err(err) = self.record_success(today) {
                    tracing::warn!(error = ?err, "could not save usage counter");
                    self.state.count = self.state.count.saturating_add(1);
                }
                Ok(Metered::Completed(value))
            }
            Err(err) => Ok(Metered::Failed(err)),
        }
    }

    fn roll_over(&mut self, current: CalendarMonth) -> Result<()> {
        if self.state.period == current {
            return Ok(());
        }
        self.commit(UsageState::fresh(current))
    }

    fn commit(&mut self, next: UsageState) -> Result<()> {
        self.store.put(USAGE_KEY, &next)?;
        self.state = next;
        Ok(())
    }

    fn exceeded(&self, tier: QuotaTier) -> QuotaExceeded {
        let resets_on = self
            .state
            .period
            .next()
            .first_day()
            .map(format_date)
            .unwrap_or_else(|| self.state.period.next().to_string());
        QuotaExceeded {
            tier,
            used: self.state.count,
            cap: tier.monthly_cap(),
            period: self.state.period,
            resets_on,
        }
    }
}

#[cfg(test)]
#[path = "tests/usage_tests.rs"]
mod tests;
