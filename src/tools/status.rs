//! FitNutrition Status Tool
//!
//! Provides runtime status information about the FitNutrition service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Account and calculator usage guide for AI assistants
pub const ACCOUNT_INSTRUCTIONS: &str = r#"
# FitNutrition Usage Instructions

FitNutrition computes daily energy and nutrient targets from a biometric profile.
Tools either work on a signed-in account (session token) or on an ad-hoc profile.

---

## Accounts

1. **register_user** - create an account and receive a session token
   - Required: `name`, `email`, `password` (6+ characters), `ageYears` (1-120),
     `sex` (male/female), `weightKg` (>= 1), `heightCm` (>= 1)
   - Optional: `activityLevel` (default `moderately_active`), `goal` (default `maintain_weight`)
2. **login** - exchange `email` + `password` for a new session token
3. **logout** - end the session behind a token
4. **get_current_user** - return the profile behind a token

Keep the token from register_user/login and pass it as `token` to every account tool.
Tokens expire; on "session expired" call login again.

---

## Profile Values

| Field | Values |
|-------|--------|
| sex | `male`, `female` |
| activityLevel | `sedentary`, `lightly_active`, `moderately_active`, `very_active`, `extremely_active` |
| goal | `lose_weight`, `maintain_weight`, `gain_weight`, `build_muscle` |

**update_profile** changes only the fields you pass. Everything else keeps its stored value.

---

## Nutrition

- **get_nutrition_calculations** (token) - dashboard view for the signed-in user:
  - `userStats`: bmi, bmiCategory, bmr, tdee, idealWeightRange, currentWeight
  - `recommendations`: weightRecommendation, targetCalories, proteinRequirement
  - `macros`: protein, carbs, fat (grams)
  - `micronutrients`: daily intakes (vitamins/minerals in mg or mcg, fiber in g)
  - `report`: the full report, including `weightStatus`
- **calculate_nutrition** (profile fields, no token) - same report for any profile

### How targets are derived

1. BMR (Mifflin-St Jeor) x activity multiplier = TDEE
2. Ideal weight range = BMI 18.5-24.9 at the user's height
3. Target calories: +/-500 kcal outside the ideal range, then the goal decides
   (lose_weight: TDEE - 500; gain_weight/build_muscle: TDEE + 500)
4. Protein: 2.2 g/kg for build_muscle or very/extremely active, 2.0 g/kg for lose_weight, else 1.6 g/kg
5. Fat: 25% of target calories; carbs: the rest

Carbs can come out negative for very small calorie targets. Report it as-is.
"#;

/// Runtime status of the FitNutrition service
#[derive(Debug, Clone, Serialize)]
pub struct FitNutritionStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> FitNutritionStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitNutritionStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
