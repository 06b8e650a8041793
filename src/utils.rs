// index of the largest value, None for an empty slice or when every value is NaN
pub fn argmax(input: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &item) in input.iter().enumerate() {
        if item.is_nan() {
            continue;
        }
        match best {
            Some((_, max)) if item <= max => {}
            _ => best = Some((i, item)),
        }
    }
    best.map(|(i, _)| i)
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_handles_negative_scores() {
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), Some(1));
    }

    #[test]
    fn argmax_keeps_first_of_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
    }

    #[test]
    fn argmax_of_nothing() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f32::NAN]), None);
    }

    #[test]
    fn sigmoid_is_centered() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(22.857142, 2), 22.86);
        assert_eq!(round_to(33.333, 1), 33.3);
    }
}
