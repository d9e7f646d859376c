use crate::errors::FairnessError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

/// Format a slice of floats for log output.
pub fn fmt_vec_output(v: &[f64]) -> String {
    v.iter().map(|x| format!("{:.4}", x)).collect::<Vec<_>>().join(", ")
}

// Validation
pub fn validate_positive_int_parameter(value: usize, parameter: &str) -> Result<(), FairnessError> {
    if value == 0 {
        Err(FairnessError::InvalidParameter(
            parameter.to_string(),
            "positive integer".to_string(),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_equal_length(lengths: &[usize], names: &str) -> Result<(), FairnessError> {
    if lengths.windows(2).any(|w| w[0] != w[1]) {
        Err(FairnessError::DifferentInputLength(names.to_string()))
    } else {
        Ok(())
    }
}

/// Index of the smallest value, the first one wins on ties.
/// NaN values are skipped, `None` is returned if there are no comparable values.
pub fn first_argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if *v >= b => {}
            _ => best = Some((i, *v)),
        }
    }
    best.map(|(i, _)| i)
}
