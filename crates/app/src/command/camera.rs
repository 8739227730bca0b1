//! Camera recording and night-vision commands.

capability_toggle! {
    /// Start recording. Undo stops only if the camera was idle before.
    StartRecordingCommand => "start_recording",
    via as_recorder_mut,
    read is_recording,
    apply start_recording,
    revert stop_recording when prior is false
}

capability_toggle! {
    /// Stop recording. Undo restarts only if the camera was recording before.
    StopRecordingCommand => "stop_recording",
    via as_recorder_mut,
    read is_recording,
    apply stop_recording,
    revert start_recording when prior is true
}

capability_toggle! {
    /// Enable night vision. Undo disables it only if it was off before.
    EnableNightVisionCommand => "enable_night_vision",
    via as_night_vision_mut,
    read is_night_vision_enabled,
    apply enable_night_vision,
    revert disable_night_vision when prior is false
}

capability_toggle! {
    /// Disable night vision. Undo re-enables it only if it was on before.
    DisableNightVisionCommand => "disable_night_vision",
    via as_night_vision_mut,
    read is_night_vision_enabled,
    apply disable_night_vision,
    revert enable_night_vision when prior is true
}
