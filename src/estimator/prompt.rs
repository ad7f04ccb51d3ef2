use super::submission::Demographics;

/// Instruction used when only the two photos are provided.
pub const COMPOSITION_PROMPT: &str = r#"You are a health and fitness expert.
Given the following **front-view** and **side-view** full-body images of a person, estimate their physical metrics based on visual analysis. Assume the person is standing upright, with typical body proportions and neutral posture.
Your task is to estimate the following:
1. **Height** (in centimeters)
2. **Weight** (in kilograms)
3. **Body Fat Percentage** (in %)
Use visual cues such as:
- Abdominal protrusion
- Muscle tone
- Waist-to-hip ratio
- Neck size
- Overall body composition and build
Return the result in as shown below:
"height_cm": ...,
"weight_kg": ...,
"body_fat_percentage": ..."#;

/// Picks the template from what the submission carries.
pub fn build_prompt(demographics: Option<&Demographics>) -> String {
    match demographics {
        Some(demographics) => insight_prompt(demographics),
        None => COMPOSITION_PROMPT.to_string(),
    }
}

fn insight_prompt(demographics: &Demographics) -> String {
    format!(
        "You are a certified body composition expert.
Given the user's age, gender, height, weight, and two full-body images (front and side views), do the following:
1. Estimate the user's body fat percentage.
2. Identify the dominant type of fat distribution (e.g., abdominal/visceral fat, subcutaneous fat, or evenly distributed fat) based on visual signs in the images.
3. Classify the result into one of the health categories: essential fat, athletic, fit, average, or obese - based on their gender.
4. Recommend a healthy goal fat percentage range based on standard fitness guidelines for their gender and age.
User Information:
- Gender: {gender}
- Age: {age}
- Height: {height} cm
- Weight: {weight} kg
Please respond in plain English in natural sentences. Do not use lists or JSON.",
        gender = demographics.gender,
        age = demographics.age,
        height = demographics.height_cm,
        weight = demographics.weight_kg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Gender;

    #[test]
    fn test_composition_prompt_without_demographics() {
        let prompt = build_prompt(None);

        assert_eq!(prompt, COMPOSITION_PROMPT);
        assert!(prompt.contains("\"height_cm\""));
        assert!(prompt.contains("\"weight_kg\""));
        assert!(prompt.contains("\"body_fat_percentage\""));
    }

    #[test]
    fn test_insight_prompt_interpolates_fields() {
        let demographics = Demographics {
            gender: Gender::Female,
            age: 42,
            height_cm: 163,
            weight_kg: 58,
        };

        let prompt = build_prompt(Some(&demographics));

        assert!(prompt.contains("- Gender: Female"));
        assert!(prompt.contains("- Age: 42"));
        assert!(prompt.contains("- Height: 163 cm"));
        assert!(prompt.contains("- Weight: 58 kg"));
        assert!(prompt.contains("Do not use lists or JSON."));
        assert!(!prompt.contains("height_cm"));
    }
}
