use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    Private,
    Friends,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    pub facing: CameraFacing,
    pub frame_rate: u32,
    pub pose_overlay: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Front,
            frame_rate: 30,
            pose_overlay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionAnalysisSettings {
    pub real_time_feedback: bool,
    pub voice_instructions: bool,
    pub difficulty: Difficulty,
    /// Target form accuracy in percent, 0-100.
    pub target_accuracy: u8,
}

impl Default for MotionAnalysisSettings {
    fn default() -> Self {
        Self {
            real_time_feedback: true,
            voice_instructions: true,
            difficulty: Difficulty::Intermediate,
            target_accuracy: 85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub workout_reminders: bool,
    pub achievement_alerts: bool,
    pub weekly_reports: bool,
    pub sound_effects: bool,
    pub haptic_feedback: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            workout_reminders: true,
            achievement_alerts: true,
            weekly_reports: true,
            sound_effects: true,
            haptic_feedback: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub data_sharing: bool,
    pub analytics: bool,
    pub profile_visibility: ProfileVisibility,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            data_sharing: false,
            analytics: true,
            profile_visibility: ProfileVisibility::Private,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSettings {
    pub theme: String,
    pub units: Units,
    pub language: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            units: Units::Metric,
            language: "en".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub camera: CameraSettings,
    pub motion_analysis: MotionAnalysisSettings,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub preferences: PreferenceSettings,
}

/// Partial settings update. Every field is whitelisted; payloads carrying
/// unknown keys fail to deserialize instead of being merged blindly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsUpdate {
    pub camera: Option<CameraSettingsUpdate>,
    pub motion_analysis: Option<MotionAnalysisSettingsUpdate>,
    pub notifications: Option<NotificationSettingsUpdate>,
    pub privacy: Option<PrivacySettingsUpdate>,
    pub preferences: Option<PreferenceSettingsUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CameraSettingsUpdate {
    pub facing: Option<CameraFacing>,
    pub frame_rate: Option<u32>,
    pub pose_overlay: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MotionAnalysisSettingsUpdate {
    pub real_time_feedback: Option<bool>,
    pub voice_instructions: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub target_accuracy: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationSettingsUpdate {
    pub workout_reminders: Option<bool>,
    pub achievement_alerts: Option<bool>,
    pub weekly_reports: Option<bool>,
    pub sound_effects: Option<bool>,
    pub haptic_feedback: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrivacySettingsUpdate {
    pub data_sharing: Option<bool>,
    pub analytics: Option<bool>,
    pub profile_visibility: Option<ProfileVisibility>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PreferenceSettingsUpdate {
    pub theme: Option<String>,
    pub units: Option<Units>,
    pub language: Option<String>,
}

impl SettingsUpdate {
    pub fn apply(self, settings: &mut UserSettings) {
        if let Some(camera) = self.camera {
            if let Some(facing) = camera.facing {
                settings.camera.facing = facing;
            }
            if let Some(frame_rate) = camera.frame_rate {
                settings.camera.frame_rate = frame_rate;
            }
            if let Some(pose_overlay) = camera.pose_overlay {
                settings.camera.pose_overlay = pose_overlay;
            }
        }
        if let Some(motion) = self.motion_analysis {
            if let Some(real_time_feedback) = motion.real_time_feedback {
                settings.motion_analysis.real_time_feedback = real_time_feedback;
            }
            if let Some(voice_instructions) = motion.voice_instructions {
                settings.motion_analysis.voice_instructions = voice_instructions;
            }
            if let Some(difficulty) = motion.difficulty {
                settings.motion_analysis.difficulty = difficulty;
            }
            if let Some(target_accuracy) = motion.target_accuracy {
                settings.motion_analysis.target_accuracy = target_accuracy.min(100);
            }
        }
        if let Some(notifications) = self.notifications {
            if let Some(workout_reminders) = notifications.workout_reminders {
                settings.notifications.workout_reminders = workout_reminders;
            }
            if let Some(achievement_alerts) = notifications.achievement_alerts {
                settings.notifications.achievement_alerts = achievement_alerts;
            }
            if let Some(weekly_reports) = notifications.weekly_reports {
                settings.notifications.weekly_reports = weekly_reports;
            }
            if let Some(sound_effects) = notifications.sound_effects {
                settings.notifications.sound_effects = sound_effects;
            }
            if let Some(haptic_feedback) = notifications.haptic_feedback {
                settings.notifications.haptic_feedback = haptic_feedback;
            }
        }
        if let Some(privacy) = self.privacy {
            if let Some(data_sharing) = privacy.data_sharing {
                settings.privacy.data_sharing = data_sharing;
            }
            if let Some(analytics) = privacy.analytics {
                settings.privacy.analytics = analytics;
            }
            if let Some(profile_visibility) = privacy.profile_visibility {
                settings.privacy.profile_visibility = profile_visibility;
            }
        }
        if let Some(preferences) = self.preferences {
            if let Some(theme) = preferences.theme {
                settings.preferences.theme = theme;
            }
            if let Some(units) = preferences.units {
                settings.preferences.units = units;
            }
            if let Some(language) = preferences.language {
                settings.preferences.language = language;
            }
        }
    }
}
