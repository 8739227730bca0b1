//! Security rule: start camera recording when a group sees motion or has an
//! unlocked door.

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::automation::{AutomationMode, RuleState};
use smarthome_domain::id::{DeviceId, GroupId};

use super::AutomationRule;
use crate::command::StartRecordingCommand;
use crate::controller::Home;
use crate::scheduler::Scheduler;

const SOURCE: &str = "SecurityMode";
const MOTION_ACTION: &str = "Motion detected - Camera started recording";
const UNLOCKED_ACTION: &str = "Door unlocked - Camera started recording";

/// For each group the first camera, first motion sensor and first lock (in
/// membership order) are considered. Motion and an unlocked door each start
/// the camera and emit an audit record, so both can fire in one pass.
#[derive(Debug, Default)]
pub struct SecurityRule {
    state: RuleState,
}

impl SecurityRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

struct Findings {
    camera: DeviceId,
    motion: bool,
    unlocked: bool,
}

fn inspect(home: &Home, group: &GroupId) -> Option<Findings> {
    let registry = home.registry();
    let camera = registry
        .group_members(group)
        .find(|device| device.as_recorder().is_some())?
        .id()
        .clone();
    let motion = registry
        .group_members(group)
        .find_map(|device| device.as_motion_sensor())
        .is_some_and(|sensor| sensor.motion_detected());
    let unlocked = registry
        .group_members(group)
        .find_map(|device| device.as_lock())
        .is_some_and(|lock| !lock.is_locked());
    Some(Findings {
        camera,
        motion,
        unlocked,
    })
}

fn start_recording(home: &mut Home, camera: &DeviceId, group: &GroupId, action: &str) {
    home.apply_untracked(&mut StartRecordingCommand::new(camera.clone()));
    home.record(AuditRecord::new(SOURCE, action).target(group.to_string()));
    tracing::info!(%group, %camera, action, "security rule fired");
}

impl AutomationRule for SecurityRule {
    fn mode(&self) -> AutomationMode {
        AutomationMode::Security
    }

    fn state(&self) -> RuleState {
        self.state
    }

    #[tracing::instrument(skip_all, fields(groups = groups.len()))]
    fn activate(&mut self, groups: &[GroupId], home: &mut Home, _: &mut Scheduler<Home>) {
        self.state = RuleState::Active;
        for group in groups {
            let Some(findings) = inspect(home, group) else {
                continue;
            };
            if findings.motion {
                start_recording(home, &findings.camera, group, MOTION_ACTION);
            }
            if findings.unlocked {
                start_recording(home, &findings.camera, group, UNLOCKED_ACTION);
            }
        }
    }

    fn deactivate(&mut self) {
        self.state = RuleState::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FakeCamera, FakeSensor, SpyAudit};
    use std::sync::Arc;

    fn home_with(spy: &Arc<SpyAudit>) -> Home {
        Home::new(testing::home(), Box::new(Arc::clone(spy)), None)
    }

    fn set_motion(home: &mut Home, detected: bool) {
        home.registry_mut()
            .device_mut(&DeviceId::new("sensor"))
            .and_then(|device| device.as_motion_sensor_mut())
            .unwrap()
            .set_motion_detected(detected);
    }

    fn unlock(home: &mut Home) {
        home.registry_mut()
            .device_mut(&DeviceId::new("door"))
            .and_then(|device| device.as_lock_mut())
            .unwrap()
            .unlock();
    }

    fn recording(home: &Home) -> bool {
        home.registry()
            .device(&DeviceId::new("camera"))
            .and_then(|device| device.as_recorder())
            .unwrap()
            .is_recording()
    }

    fn hallway() -> Vec<GroupId> {
        vec![GroupId::new("hallway")]
    }

    #[test]
    fn should_start_recording_when_motion_detected() {
        let spy = SpyAudit::shared();
        let mut home = home_with(&spy);
        let mut scheduler = Scheduler::new();
        set_motion(&mut home, true);
        let mut rule = SecurityRule::new();

        rule.activate(&hallway(), &mut home, &mut scheduler);

        assert!(recording(&home));
        assert_eq!(rule.state(), RuleState::Active);
        let records = spy.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, MOTION_ACTION);
        assert_eq!(records[0].target.as_deref(), Some("hallway"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn should_fire_twice_when_motion_and_unlocked_door() {
        let spy = SpyAudit::shared();
        let mut home = home_with(&spy);
        set_motion(&mut home, true);
        unlock(&mut home);

        SecurityRule::new().activate(&hallway(), &mut home, &mut Scheduler::new());

        assert_eq!(spy.actions(), [MOTION_ACTION, UNLOCKED_ACTION]);
    }

    #[test]
    fn should_do_nothing_when_quiet_and_locked() {
        let spy = SpyAudit::shared();
        let mut home = home_with(&spy);

        SecurityRule::new().activate(&hallway(), &mut home, &mut Scheduler::new());

        assert!(!recording(&home));
        assert!(spy.records().is_empty());
    }

    #[test]
    fn should_skip_group_without_camera() {
        let spy = SpyAudit::shared();
        let mut registry = smarthome_domain::registry::Registry::new();
        registry.add_device(FakeSensor::boxed("pir", true)).unwrap();
        let porch = GroupId::new("porch");
        registry.create_group(porch.clone()).unwrap();
        registry.add_to_group(&porch, &DeviceId::new("pir")).unwrap();
        let mut home = Home::new(registry, Box::new(Arc::clone(&spy)), None);

        SecurityRule::new().activate(&[porch], &mut home, &mut Scheduler::new());

        assert!(spy.records().is_empty());
    }

    #[test]
    fn should_use_first_camera_in_membership_order() {
        let spy = SpyAudit::shared();
        let mut home = home_with(&spy);
        home.registry_mut().add_device(FakeCamera::boxed("backup")).unwrap();
        let hallway = GroupId::new("hallway");
        home.registry_mut()
            .add_to_group(&hallway, &DeviceId::new("backup"))
            .unwrap();
        set_motion(&mut home, true);

        SecurityRule::new().activate(&[hallway], &mut home, &mut Scheduler::new());

        assert!(recording(&home));
        let backup_recording = home
            .registry()
            .device(&DeviceId::new("backup"))
            .and_then(|device| device.as_recorder())
            .unwrap()
            .is_recording();
        assert!(!backup_recording);
    }

    #[test]
    fn should_fire_again_on_each_activation() {
        let spy = SpyAudit::shared();
        let mut home = home_with(&spy);
        set_motion(&mut home, true);
        let mut rule = SecurityRule::new();
        let mut scheduler = Scheduler::new();

        rule.activate(&hallway(), &mut home, &mut scheduler);
        rule.activate(&hallway(), &mut home, &mut scheduler);
        rule.deactivate();

        assert_eq!(spy.records().len(), 2);
        assert_eq!(rule.state(), RuleState::Inactive);
        assert_eq!(home.history_len(), 0);
    }
}
