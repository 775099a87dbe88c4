//! Static badge and milestone definitions. Each badge row carries both its
//! unlock predicate and its display-progress formula through one
//! [`ProgressRule`], so the two can never drift apart.

use chrono::{DateTime, Utc};

use crate::models::{
    BadgesRecord, EarnedBadge, LockedBadge, MilestoneDescriptor, MilestonesRecord, Progress,
};

/// A threshold over one `Progress` field. Doubles as the unlock predicate
/// and the percentage-toward-unlock formula.
#[derive(Debug, Clone, Copy)]
pub enum ProgressRule {
    TotalSessions(u32),
    PerfectForms(u32),
    Streak(u32),
    BestScore(f64),
    AverageScore(f64),
}

impl ProgressRule {
    pub fn satisfied(&self, progress: &Progress) -> bool {
        match *self {
            ProgressRule::TotalSessions(target) => progress.total_sessions >= target,
            ProgressRule::PerfectForms(target) => progress.perfect_forms >= target,
            ProgressRule::Streak(target) => progress.streak >= target,
            ProgressRule::BestScore(target) => progress.best_motion_score >= target,
            ProgressRule::AverageScore(target) => progress.average_motion_score >= target,
        }
    }

    /// Percentage toward the threshold, clamped to 0-100.
    pub fn percent(&self, progress: &Progress) -> f64 {
        let (current, target) = match *self {
            ProgressRule::TotalSessions(target) => (f64::from(progress.total_sessions), f64::from(target)),
            ProgressRule::PerfectForms(target) => (f64::from(progress.perfect_forms), f64::from(target)),
            ProgressRule::Streak(target) => (f64::from(progress.streak), f64::from(target)),
            ProgressRule::BestScore(target) => (progress.best_motion_score, target),
            ProgressRule::AverageScore(target) => (progress.average_motion_score, target),
        };
        if target <= 0.0 {
            return 100.0;
        }
        (current / target * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BadgeDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub rule: ProgressRule,
}

impl BadgeDef {
    pub fn to_earned(&self, unlocked_at: DateTime<Utc>) -> EarnedBadge {
        EarnedBadge {
            id: self.id.into(),
            title: self.title.into(),
            description: self.description.into(),
            icon: self.icon.into(),
            category: self.category.into(),
            unlocked_at,
        }
    }

    fn to_locked(&self) -> LockedBadge {
        LockedBadge {
            id: self.id.into(),
            title: self.title.into(),
            requirement: self.description.into(),
            icon: self.icon.into(),
            category: self.category.into(),
        }
    }
}

/// Badges unlockable through the achievement check, evaluated in this order.
pub const BADGES: &[BadgeDef] = &[
    BadgeDef {
        id: "first_steps",
        title: "First Steps",
        description: "Completed first motion analysis",
        icon: "👶",
        category: "getting_started",
        rule: ProgressRule::TotalSessions(1),
    },
    BadgeDef {
        id: "tech_guru",
        title: "Tech Guru",
        description: "Mastered camera setup and tracking",
        icon: "📱",
        category: "technical",
        rule: ProgressRule::TotalSessions(5),
    },
    BadgeDef {
        id: "form_master",
        title: "Form Master",
        description: "10 perfect-form sessions",
        icon: "🎯",
        category: "form",
        rule: ProgressRule::PerfectForms(10),
    },
    BadgeDef {
        id: "consistency_king",
        title: "Consistency King",
        description: "15-day workout streak",
        icon: "🔥",
        category: "consistency",
        rule: ProgressRule::Streak(15),
    },
    BadgeDef {
        id: "squat_specialist",
        title: "Squat Specialist",
        description: "Perfect squat form 20 times",
        icon: "🏋️",
        category: "exercises",
        rule: ProgressRule::PerfectForms(20),
    },
    BadgeDef {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Score above 95 in any exercise",
        icon: "⭐",
        category: "achievement",
        rule: ProgressRule::BestScore(95.0),
    },
    BadgeDef {
        id: "motion_tracker",
        title: "Motion Tracker",
        description: "100 motion analysis sessions",
        icon: "📊",
        category: "progress",
        rule: ProgressRule::TotalSessions(100),
    },
];

/// Long-horizon badges shown as locked in the UI. They carry no rule and
/// never unlock automatically.
pub const SHOWCASE_BADGES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "marathon_master",
        "Marathon Master",
        "Complete 1000 sessions",
        "🏃",
        "milestone",
    ),
    (
        "form_fanatic",
        "Form Fanatic",
        "Achieve 100% in 5 different exercises",
        "🏆",
        "form",
    ),
    (
        "streak_legend",
        "Streak Legend",
        "Maintain 100-day streak",
        "⚡",
        "consistency",
    ),
    (
        "ai_whisperer",
        "AI Whisperer",
        "Use AI assistant 50 times",
        "🤖",
        "social",
    ),
];

#[derive(Debug, Clone, Copy)]
pub struct MilestoneDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
    pub rule: ProgressRule,
}

impl MilestoneDef {
    fn to_descriptor(&self) -> MilestoneDescriptor {
        MilestoneDescriptor {
            id: self.id.into(),
            title: self.title.into(),
            description: self.description.into(),
            xp_reward: self.xp_reward,
        }
    }
}

/// One-time tasks with XP rewards. Completion is an explicit operation; the
/// rule only feeds the display-progress projection.
pub const MILESTONES: &[MilestoneDef] = &[
    MilestoneDef {
        id: "first_session",
        title: "Welcome to MotionSync",
        description: "Complete your first motion analysis session",
        xp_reward: 100,
        rule: ProgressRule::TotalSessions(1),
    },
    MilestoneDef {
        id: "camera_setup",
        title: "Camera Setup Master",
        description: "Successfully configure optimal camera positioning",
        xp_reward: 150,
        rule: ProgressRule::TotalSessions(5),
    },
    MilestoneDef {
        id: "form_improvement",
        title: "Form Improvement",
        description: "Improve your motion score by 20 points",
        xp_reward: 200,
        rule: ProgressRule::AverageScore(70.0),
    },
    MilestoneDef {
        id: "consistency_week",
        title: "Consistency Builder",
        description: "Complete motion analysis for 7 consecutive days",
        xp_reward: 250,
        rule: ProgressRule::Streak(7),
    },
    MilestoneDef {
        id: "exercise_variety",
        title: "Exercise Variety",
        description: "Analyze 5 different exercise types",
        xp_reward: 300,
        rule: ProgressRule::TotalSessions(15),
    },
    MilestoneDef {
        id: "perfect_form",
        title: "Perfect Form",
        description: "Achieve a motion score of 95+ in any exercise",
        xp_reward: 400,
        rule: ProgressRule::AverageScore(95.0),
    },
];

pub fn badge(badge_id: &str) -> Option<&'static BadgeDef> {
    BADGES.iter().find(|def| def.id == badge_id)
}

pub fn milestone(milestone_id: &str) -> Option<&'static MilestoneDef> {
    MILESTONES.iter().find(|def| def.id == milestone_id)
}

/// Badge record for a brand-new user: nothing earned, every catalog and
/// showcase badge locked, progress map zeroed.
pub fn starting_badges() -> BadgesRecord {
    let mut record = BadgesRecord::default();
    record.locked = BADGES.iter().map(BadgeDef::to_locked).collect();
    record
        .locked
        .extend(
            SHOWCASE_BADGES
                .iter()
                .map(|(id, title, requirement, icon, category)| LockedBadge {
                    id: (*id).into(),
                    title: (*title).into(),
                    requirement: (*requirement).into(),
                    icon: (*icon).into(),
                    category: (*category).into(),
                }),
        );
    record.progress = BADGES
        .iter()
        .map(|def| (def.id.to_string(), 0.0))
        .collect();
    record
}

/// Milestone record for a brand-new user: the full catalog pending.
pub fn starting_milestones() -> MilestonesRecord {
    MilestonesRecord {
        completed: Vec::new(),
        in_progress: MILESTONES.iter().map(MilestoneDef::to_descriptor).collect(),
        total_xp_earned: 0,
    }
}
