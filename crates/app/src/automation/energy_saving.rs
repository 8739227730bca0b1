//! Energy-saving rule: switch a group off after a cooldown when its motion
//! sensor reports no motion.

use std::collections::HashMap;

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::automation::{AutomationMode, DEFAULT_ENERGY_SAVING_COOLDOWN, RuleState};
use smarthome_domain::id::GroupId;
use smarthome_domain::registry::Registry;
use smarthome_domain::time::Span;

use super::AutomationRule;
use crate::command::GroupOffCommand;
use crate::controller::Home;
use crate::scheduler::{Scheduler, TaskToken};

const SOURCE: &str = "EnergySavingMode";
const SWITCH_OFF_ACTION: &str = "No motion - Group switched off";

/// The first motion-capable member of each group (membership order) decides.
/// Groups without one are skipped.
///
/// At most one switch-off is pending per group: re-activating cancels the
/// pending one and schedules a fresh one, restarting the cooldown. When the
/// switch-off fires it looks at the group again and does nothing if the group
/// or its sensor is gone or motion has since been detected.
#[derive(Debug)]
pub struct EnergySavingRule {
    state: RuleState,
    cooldown: Span,
    pending: HashMap<GroupId, TaskToken>,
}

impl Default for EnergySavingRule {
    fn default() -> Self {
        Self::with_cooldown(DEFAULT_ENERGY_SAVING_COOLDOWN)
    }
}

impl EnergySavingRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A negative cooldown is treated as zero.
    #[must_use]
    pub fn with_cooldown(cooldown: Span) -> Self {
        if cooldown < 0 {
            tracing::warn!(cooldown, "negative energy-saving cooldown, using 0");
        }
        Self {
            state: RuleState::Inactive,
            cooldown: cooldown.max(0),
            pending: HashMap::new(),
        }
    }

    #[must_use]
    pub fn cooldown(&self) -> Span {
        self.cooldown
    }

    /// Token of the switch-off most recently scheduled for `group`.
    #[must_use]
    pub fn pending_switch_off(&self, group: &GroupId) -> Option<TaskToken> {
        self.pending.get(group).copied()
    }
}

/// Motion reading of the first motion-capable member, `None` when the group
/// is unknown or has no such member.
fn motion_in(registry: &Registry, group: &GroupId) -> Option<bool> {
    registry
        .group_members(group)
        .find_map(|device| device.as_motion_sensor())
        .map(|sensor| sensor.motion_detected())
}

fn switch_off_if_idle(home: &mut Home, group: &GroupId) {
    if home.registry().group_is_on(group) == Some(false) {
        tracing::debug!(%group, "group already off, skipping switch-off");
        return;
    }
    match motion_in(home.registry(), group) {
        None => {
            tracing::debug!(%group, "group or its motion sensor is gone, skipping switch-off");
        }
        Some(true) => {
            tracing::debug!(%group, "motion detected since scheduling, skipping switch-off");
        }
        Some(false) => {
            home.apply_untracked(&mut GroupOffCommand::new(group.clone()));
            home.record(AuditRecord::new(SOURCE, SWITCH_OFF_ACTION).target(group.to_string()));
            tracing::info!(%group, "energy saving switched group off");
        }
    }
}

impl AutomationRule for EnergySavingRule {
    fn mode(&self) -> AutomationMode {
        AutomationMode::EnergySaving
    }

    fn state(&self) -> RuleState {
        self.state
    }

    #[tracing::instrument(skip_all, fields(groups = groups.len(), cooldown = self.cooldown))]
    fn activate(
        &mut self,
        groups: &[GroupId],
        home: &mut Home,
        scheduler: &mut Scheduler<Home>,
    ) {
        self.state = RuleState::Active;
        for group in groups {
            if motion_in(home.registry(), group) != Some(false) {
                continue;
            }
            let target = group.clone();
            let Some(token) = scheduler.schedule_after(
                self.cooldown,
                move |home: &mut Home, _: &mut Scheduler<Home>| {
                    switch_off_if_idle(home, &target);
                    Ok(())
                },
            ) else {
                continue;
            };
            if let Some(previous) = self.pending.insert(group.clone(), token)
                && scheduler.cancel(previous)
            {
                tracing::debug!(%group, %previous, "replaced pending switch-off");
            }
        }
    }

    fn deactivate(&mut self) {
        self.state = RuleState::Inactive;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, SpyAudit};
    use smarthome_domain::id::DeviceId;
    use std::sync::Arc;

    fn hallway() -> GroupId {
        GroupId::new("hallway")
    }

    fn lit_home(spy: &Arc<SpyAudit>) -> Home {
        let mut home = Home::new(testing::home(), Box::new(Arc::clone(spy)), None);
        home.registry_mut().turn_group_on(&hallway());
        home
    }

    fn set_motion(home: &mut Home, detected: bool) {
        home.registry_mut()
            .device_mut(&DeviceId::new("sensor"))
            .and_then(|device| device.as_motion_sensor_mut())
            .unwrap()
            .set_motion_detected(detected);
    }

    #[test]
    fn should_switch_group_off_once_after_cooldown() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();
        let mut rule = EnergySavingRule::new();

        rule.activate(&[hallway()], &mut home, &mut scheduler);
        assert_eq!(scheduler.len(), 1);

        assert_eq!(scheduler.tick(599, &mut home), 0);
        assert_eq!(home.registry().group_is_on(&hallway()), Some(true));
        assert_eq!(scheduler.tick(1, &mut home), 1);

        assert_eq!(home.registry().group_is_on(&hallway()), Some(false));
        assert!(!testing::is_on(home.registry(), "camera"));
        assert!(scheduler.is_empty());
        assert_eq!(spy.actions(), [SWITCH_OFF_ACTION]);
        assert_eq!(home.history_len(), 0);
    }

    #[test]
    fn should_not_schedule_when_motion_detected() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        set_motion(&mut home, true);
        let mut scheduler = Scheduler::new();

        EnergySavingRule::new().activate(&[hallway()], &mut home, &mut scheduler);

        assert!(scheduler.is_empty());
    }

    #[test]
    fn should_replace_pending_switch_off_when_reactivated() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();
        let mut rule = EnergySavingRule::new();

        rule.activate(&[hallway()], &mut home, &mut scheduler);
        let first = rule.pending_switch_off(&hallway()).unwrap();
        scheduler.tick(100, &mut home);
        rule.activate(&[hallway()], &mut home, &mut scheduler);
        let second = rule.pending_switch_off(&hallway()).unwrap();

        assert!(!scheduler.is_pending(first));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(second.due(), 700);

        assert_eq!(scheduler.tick(600, &mut home), 1);
        assert_eq!(spy.records().len(), 1);
    }

    #[test]
    fn should_skip_switch_off_when_motion_appears_before_firing() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();

        EnergySavingRule::new().activate(&[hallway()], &mut home, &mut scheduler);
        set_motion(&mut home, true);
        scheduler.tick(600, &mut home);

        assert_eq!(home.registry().group_is_on(&hallway()), Some(true));
        assert!(spy.records().is_empty());
    }

    #[test]
    fn should_skip_switch_off_when_group_deleted_before_firing() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();

        EnergySavingRule::new().activate(&[hallway()], &mut home, &mut scheduler);
        home.registry_mut().delete_group(&hallway());

        assert_eq!(scheduler.tick(600, &mut home), 1);
        assert!(testing::is_on(home.registry(), "camera"));
        assert!(spy.records().is_empty());
    }

    #[test]
    fn should_keep_scheduled_work_but_forget_bookkeeping_when_deactivated() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();
        let mut rule = EnergySavingRule::with_cooldown(10);

        rule.activate(&[hallway()], &mut home, &mut scheduler);
        rule.deactivate();

        assert_eq!(rule.state(), RuleState::Inactive);
        assert!(rule.pending_switch_off(&hallway()).is_none());
        assert_eq!(scheduler.tick(10, &mut home), 1);
        assert_eq!(home.registry().group_is_on(&hallway()), Some(false));
    }

    #[test]
    fn should_skip_groups_without_motion_sensor() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        home.registry_mut().create_group(GroupId::new("kitchen")).unwrap();
        home.registry_mut()
            .add_to_group(&GroupId::new("kitchen"), &DeviceId::new("lamp"))
            .unwrap();
        let mut scheduler = Scheduler::new();

        EnergySavingRule::new().activate(&[GroupId::new("kitchen")], &mut home, &mut scheduler);

        assert!(scheduler.is_empty());
    }

    #[test]
    fn should_switch_off_once_when_reactivated_after_deactivate() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();
        let mut rule = EnergySavingRule::new();

        rule.activate(&[hallway()], &mut home, &mut scheduler);
        rule.deactivate();
        rule.activate(&[hallway()], &mut home, &mut scheduler);
        scheduler.tick(600, &mut home);

        assert_eq!(home.registry().group_is_on(&hallway()), Some(false));
        assert_eq!(spy.actions(), [SWITCH_OFF_ACTION]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn should_treat_negative_cooldown_as_zero() {
        let spy = SpyAudit::shared();
        let mut home = lit_home(&spy);
        let mut scheduler = Scheduler::new();
        let mut rule = EnergySavingRule::with_cooldown(-5);

        rule.activate(&[hallway()], &mut home, &mut scheduler);

        assert_eq!(rule.cooldown(), 0);
        assert_eq!(rule.pending_switch_off(&hallway()).map(|t| t.due()), Some(0));
        assert_eq!(scheduler.tick(0, &mut home), 1);
        assert_eq!(home.registry().group_is_on(&hallway()), Some(false));
    }
}
