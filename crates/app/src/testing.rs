//! In-memory fakes shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::device::{
    Climate, Device, DeviceKind, Dimmable, Lockable, MotionSensing, NightVision, Recording,
    ThermostatMode,
};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, GroupId};
use smarthome_domain::registry::Registry;

use crate::ports::AuditSink;

#[derive(Default)]
pub struct SpyAudit {
    records: Mutex<Vec<AuditRecord>>,
}

impl SpyAudit {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn actions(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.action.clone())
            .collect()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditSink for SpyAudit {
    fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Dimmable lamp.
pub struct FakeLight {
    pub id: DeviceId,
    pub on: bool,
    pub brightness: u8,
}

impl FakeLight {
    pub fn boxed(id: &str) -> Box<dyn Device> {
        Box::new(Self {
            id: DeviceId::new(id),
            on: false,
            brightness: 0,
        })
    }
}

impl Device for FakeLight {
    fn id(&self) -> &DeviceId {
        &self.id
    }
    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }
    fn turn_on(&mut self) {
        self.on = true;
    }
    fn turn_off(&mut self) {
        self.on = false;
    }
    fn is_on(&self) -> bool {
        self.on
    }
    fn status(&self) -> String {
        format!("on={} brightness={}", self.on, self.brightness)
    }
    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        Some(self)
    }
    fn as_dimmable_mut(&mut self) -> Option<&mut dyn Dimmable> {
        Some(self)
    }
}

impl Dimmable for FakeLight {
    fn brightness(&self) -> u8 {
        self.brightness
    }
    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(100);
    }
}

#[derive(Default)]
pub struct FakeCamera {
    pub id: DeviceId,
    pub on: bool,
    pub recording: bool,
    pub night_vision: bool,
    pub recording_starts: usize,
}

impl FakeCamera {
    pub fn boxed(id: &str) -> Box<dyn Device> {
        Box::new(Self {
            id: DeviceId::new(id),
            ..Self::default()
        })
    }
}

impl Device for FakeCamera {
    fn id(&self) -> &DeviceId {
        &self.id
    }
    fn kind(&self) -> DeviceKind {
        DeviceKind::Camera
    }
    fn turn_on(&mut self) {
        self.on = true;
    }
    fn turn_off(&mut self) {
        self.on = false;
    }
    fn is_on(&self) -> bool {
        self.on
    }
    fn status(&self) -> String {
        format!("recording={}", self.recording)
    }
    fn as_recorder(&self) -> Option<&dyn Recording> {
        Some(self)
    }
    fn as_recorder_mut(&mut self) -> Option<&mut dyn Recording> {
        Some(self)
    }
    fn as_night_vision(&self) -> Option<&dyn NightVision> {
        Some(self)
    }
    fn as_night_vision_mut(&mut self) -> Option<&mut dyn NightVision> {
        Some(self)
    }
}

impl Recording for FakeCamera {
    fn is_recording(&self) -> bool {
        self.recording
    }
    fn start_recording(&mut self) {
        self.recording = true;
        self.recording_starts += 1;
    }
    fn stop_recording(&mut self) {
        self.recording = false;
    }
}

impl NightVision for FakeCamera {
    fn is_night_vision_enabled(&self) -> bool {
        self.night_vision
    }
    fn enable_night_vision(&mut self) {
        self.night_vision = true;
    }
    fn disable_night_vision(&mut self) {
        self.night_vision = false;
    }
}

#[derive(Default)]
pub struct FakeSensor {
    pub id: DeviceId,
    pub on: bool,
    pub motion: bool,
}

impl FakeSensor {
    pub fn boxed(id: &str, motion: bool) -> Box<dyn Device> {
        Box::new(Self {
            id: DeviceId::new(id),
            on: true,
            motion,
        })
    }
}

impl Device for FakeSensor {
    fn id(&self) -> &DeviceId {
        &self.id
    }
    fn kind(&self) -> DeviceKind {
        DeviceKind::MotionSensor
    }
    fn turn_on(&mut self) {
        self.on = true;
    }
    fn turn_off(&mut self) {
        self.on = false;
    }
    fn is_on(&self) -> bool {
        self.on
    }
    fn status(&self) -> String {
        format!("motion={}", self.motion)
    }
    fn as_motion_sensor(&self) -> Option<&dyn MotionSensing> {
        Some(self)
    }
    fn as_motion_sensor_mut(&mut self) -> Option<&mut dyn MotionSensing> {
        Some(self)
    }
}

impl MotionSensing for FakeSensor {
    fn motion_detected(&self) -> bool {
        self.motion
    }
    fn set_motion_detected(&mut self, detected: bool) {
        self.motion = detected;
    }
}

pub struct FakeLock {
    pub id: DeviceId,
    pub locked: bool,
}

impl FakeLock {
    pub fn boxed(id: &str, locked: bool) -> Box<dyn Device> {
        Box::new(Self {
            id: DeviceId::new(id),
            locked,
        })
    }
}

impl Device for FakeLock {
    fn id(&self) -> &DeviceId {
        &self.id
    }
    fn kind(&self) -> DeviceKind {
        DeviceKind::DoorLock
    }
    fn turn_on(&mut self) {
        self.locked = false;
    }
    fn turn_off(&mut self) {
        self.locked = true;
    }
    fn is_on(&self) -> bool {
        !self.locked
    }
    fn status(&self) -> String {
        format!("locked={}", self.locked)
    }
    fn as_lock(&self) -> Option<&dyn Lockable> {
        Some(self)
    }
    fn as_lock_mut(&mut self) -> Option<&mut dyn Lockable> {
        Some(self)
    }
}

impl Lockable for FakeLock {
    fn is_locked(&self) -> bool {
        self.locked
    }
    fn lock(&mut self) {
        self.locked = true;
    }
    fn unlock(&mut self) {
        self.locked = false;
    }
}

pub struct FakeThermostat {
    pub id: DeviceId,
    pub mode: ThermostatMode,
    pub target: f32,
}

impl FakeThermostat {
    pub fn boxed(id: &str) -> Box<dyn Device> {
        Box::new(Self {
            id: DeviceId::new(id),
            mode: ThermostatMode::Off,
            target: 24.0,
        })
    }
}

impl Device for FakeThermostat {
    fn id(&self) -> &DeviceId {
        &self.id
    }
    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }
    fn turn_on(&mut self) {
        self.mode = ThermostatMode::Heating;
    }
    fn turn_off(&mut self) {
        self.mode = ThermostatMode::Off;
    }
    fn is_on(&self) -> bool {
        self.mode != ThermostatMode::Off
    }
    fn status(&self) -> String {
        format!("mode={} target={}", self.mode, self.target)
    }
    fn as_thermostat(&self) -> Option<&dyn Climate> {
        Some(self)
    }
    fn as_thermostat_mut(&mut self) -> Option<&mut dyn Climate> {
        Some(self)
    }
}

impl Climate for FakeThermostat {
    fn mode(&self) -> ThermostatMode {
        self.mode
    }
    fn set_mode(&mut self, mode: ThermostatMode) {
        self.mode = mode;
    }
    fn target_temperature(&self) -> f32 {
        self.target
    }
    fn set_target_temperature(&mut self, celsius: f32) {
        self.target = celsius;
    }
}

/// Registry with one device of every kind and a `hallway` group holding
/// camera, sensor and lock.
pub fn home() -> Registry {
    let mut registry = Registry::new();
    registry.add_device(FakeLight::boxed("lamp")).unwrap();
    registry.add_device(FakeCamera::boxed("camera")).unwrap();
    registry.add_device(FakeSensor::boxed("sensor", false)).unwrap();
    registry.add_device(FakeLock::boxed("door", true)).unwrap();
    registry.add_device(FakeThermostat::boxed("hvac")).unwrap();
    let hallway = GroupId::new("hallway");
    registry.create_group(hallway.clone()).unwrap();
    for member in ["camera", "sensor", "door"] {
        registry.add_to_group(&hallway, &DeviceId::new(member)).unwrap();
    }
    registry
}

pub fn is_on(registry: &Registry, id: &str) -> bool {
    registry.device(&DeviceId::new(id)).unwrap().is_on()
}
