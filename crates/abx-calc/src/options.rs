use abx_core::keywords::NO_CULTURE_GROWTH;
use abx_core::{InterimField, ResultOption};

/// Result options of an analysis: one per antibiotic and labelled choice.
///
/// The analysis result is never entered directly; it is the selection of
/// these options that ends up in reports. Result values are positional and
/// are regenerated whenever the interim fields change.
pub fn result_options(fields: &[InterimField]) -> Vec<ResultOption> {
    let mut options = Vec::new();
    for field in fields {
        for choice in field.choice_list() {
            if choice.label.is_empty() {
                continue;
            }
            options.push(ResultOption {
                result_text: format!("{}: {}", field.display_name(), choice.label),
                result_value: options.len().to_string(),
                interim_keyword: field.keyword.clone(),
                interim_value: choice.code.clone(),
            });
        }
    }
    options
}

/// Result options of the microorganism identification analysis.
pub fn identification_options<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<ResultOption> {
    std::iter::once(NO_CULTURE_GROWTH)
        .chain(names)
        .enumerate()
        .map(|(i, name)| ResultOption {
            result_text: name.to_string(),
            result_value: i.to_string(),
            interim_keyword: String::new(),
            interim_value: String::new(),
        })
        .collect()
}
