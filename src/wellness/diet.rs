use serde::{Deserialize, Serialize};

use crate::utils::round_to;

// 0.8 g per kg for a 70 kg reference adult
const PROTEIN_TARGET_GRAMS: f64 = 56.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DietLog {
    pub meals: Vec<String>,
    /// liters
    pub water_intake: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macronutrients {
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroDistribution {
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fats_percentage: f64,
}

impl MacroDistribution {
    fn of(log: &DietLog) -> Self {
        let share = |grams: f64, kcal_per_gram: f64| {
            if log.calories > 0.0 {
                grams * kcal_per_gram / log.calories * 100.0
            } else {
                0.0
            }
        };
        Self {
            protein_percentage: share(log.protein, 4.0),
            carbs_percentage: share(log.carbs, 4.0),
            fats_percentage: share(log.fats, 9.0),
        }
    }

    fn rounded(&self) -> Self {
        Self {
            protein_percentage: round_to(self.protein_percentage, 1),
            carbs_percentage: round_to(self.carbs_percentage, 1),
            fats_percentage: round_to(self.fats_percentage, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietState {
    pub meal_count: usize,
    pub water_intake_liters: f64,
    pub total_calories: f64,
    pub macronutrients: Macronutrients,
    pub hydration_status: &'static str,
    pub meal_frequency: &'static str,
    pub macro_distribution: MacroDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietAnalysis {
    pub current_state: DietState,
    pub improvements: Vec<&'static str>,
    pub consequences: Vec<&'static str>,
}

pub fn analyze_diet(log: &DietLog) -> DietAnalysis {
    let distribution = MacroDistribution::of(log);
    DietAnalysis {
        current_state: diet_state(log, &distribution),
        improvements: diet_improvements(log, &distribution),
        consequences: diet_consequences(log),
    }
}

fn diet_state(log: &DietLog, distribution: &MacroDistribution) -> DietState {
    let hydration_status = if log.water_intake < 2.0 {
        "Dehydrated"
    } else if log.water_intake < 3.0 {
        "Adequately hydrated"
    } else {
        "Well hydrated"
    };

    let meal_count = log.meals.len();
    let meal_frequency = match meal_count {
        0..=2 => "Below recommended",
        3..=5 => "Optimal",
        _ => "High frequency",
    };

    DietState {
        meal_count,
        water_intake_liters: log.water_intake,
        total_calories: log.calories,
        macronutrients: Macronutrients {
            protein_grams: log.protein,
            carbs_grams: log.carbs,
            fats_grams: log.fats,
        },
        hydration_status,
        meal_frequency,
        macro_distribution: distribution.rounded(),
    }
}

fn diet_improvements(log: &DietLog, distribution: &MacroDistribution) -> Vec<&'static str> {
    let mut improvements = Vec::new();

    if log.water_intake < 2.0 {
        improvements.push("Increase water intake to at least 2-3 liters per day");
    }
    if log.meals.len() < 3 {
        improvements.push("Eat at least 3 balanced meals daily");
    }
    if log.protein < PROTEIN_TARGET_GRAMS {
        improvements.push("Increase protein intake to at least 56g daily");
    }

    if log.calories < 1500.0 {
        improvements.push("Consider increasing caloric intake if trying to maintain weight");
    } else if log.calories > 2500.0 {
        improvements.push(
            "Consider moderating caloric intake if not actively building muscle or highly active",
        );
    }

    if distribution.protein_percentage < 15.0 {
        improvements.push("Increase protein proportion in diet");
    }
    if distribution.fats_percentage < 20.0 {
        improvements.push("Ensure adequate healthy fat intake");
    }
    if distribution.fats_percentage > 40.0 {
        improvements.push("Reduce fat intake, focus on healthy sources");
    }

    improvements
}

fn diet_consequences(log: &DietLog) -> Vec<&'static str> {
    let mut consequences = Vec::new();

    if log.water_intake < 2.0 {
        consequences.push(
            "Chronic dehydration can lead to kidney problems, fatigue, and reduced cognitive function",
        );
    }
    if log.meals.len() < 3 {
        consequences.push(
            "Irregular eating patterns may lead to metabolic issues and energy fluctuations",
        );
    }
    if log.protein < 50.0 {
        consequences.push(
            "Insufficient protein can lead to muscle loss, weakened immune system, and slower recovery",
        );
    }

    if log.calories < 1200.0 {
        consequences.push(
            "Very low calorie intake can lead to nutrient deficiencies, metabolic slowdown, and muscle loss",
        );
    } else if log.calories > 3000.0 && log.fats > 100.0 {
        consequences.push(
            "Excessive calorie and fat intake may increase risk of obesity and cardiovascular issues",
        );
    }

    if log.fats < 30.0 {
        consequences
            .push("Too little fat can affect hormone production and vitamin absorption");
    }

    consequences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(meals: usize, water: f64, calories: f64, protein: f64, carbs: f64, fats: f64) -> DietLog {
        DietLog {
            meals: (0..meals).map(|i| format!("meal {i}")).collect(),
            water_intake: water,
            calories,
            protein,
            carbs,
            fats,
        }
    }

    #[test]
    fn balanced_day_has_nothing_to_fix() {
        let analysis = analyze_diet(&log(3, 2.5, 2000.0, 100.0, 250.0, 60.0));
        let state = &analysis.current_state;
        assert_eq!(state.hydration_status, "Adequately hydrated");
        assert_eq!(state.meal_frequency, "Optimal");
        assert_eq!(state.macro_distribution.protein_percentage, 20.0);
        assert_eq!(state.macro_distribution.carbs_percentage, 50.0);
        assert_eq!(state.macro_distribution.fats_percentage, 27.0);
        assert!(analysis.improvements.is_empty());
        assert!(analysis.consequences.is_empty());
    }

    #[test]
    fn poor_day_flags_everything() {
        let analysis = analyze_diet(&log(1, 1.0, 1000.0, 20.0, 150.0, 10.0));
        assert_eq!(analysis.current_state.hydration_status, "Dehydrated");
        assert_eq!(analysis.current_state.meal_frequency, "Below recommended");
        assert_eq!(
            analysis.improvements,
            vec![
                "Increase water intake to at least 2-3 liters per day",
                "Eat at least 3 balanced meals daily",
                "Increase protein intake to at least 56g daily",
                "Consider increasing caloric intake if trying to maintain weight",
                "Increase protein proportion in diet",
                "Ensure adequate healthy fat intake",
            ]
        );
        assert_eq!(analysis.consequences.len(), 5);
    }

    #[test]
    fn heavy_day() {
        let analysis = analyze_diet(&log(7, 3.5, 3500.0, 150.0, 300.0, 180.0));
        assert_eq!(analysis.current_state.hydration_status, "Well hydrated");
        assert_eq!(analysis.current_state.meal_frequency, "High frequency");
        assert!(analysis
            .improvements
            .contains(&"Reduce fat intake, focus on healthy sources"));
        assert_eq!(
            analysis.consequences,
            vec!["Excessive calorie and fat intake may increase risk of obesity and cardiovascular issues"]
        );
    }

    #[test]
    fn zero_calories_gives_zero_shares() {
        let analysis = analyze_diet(&log(3, 2.0, 0.0, 60.0, 10.0, 40.0));
        let shares = &analysis.current_state.macro_distribution;
        assert_eq!(shares.protein_percentage, 0.0);
        assert_eq!(shares.fats_percentage, 0.0);
    }
}
