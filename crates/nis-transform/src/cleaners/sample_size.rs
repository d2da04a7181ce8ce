use nis_common::{int_column, parse_count, text_values};
use nis_model::SampleSizeConfig;
use nis_model::schema::SAMPLE_SIZE;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{drop_if_present, filter_rows, require_columns, warn_dropped, with_column};

/// Parses `sample_size` as an integer count, or fills an override.
///
/// Unparseable counts drop their rows with a warning.
pub fn clean_sample_size(df: &DataFrame, config: &SampleSizeConfig) -> Result<DataFrame> {
    config.check()?;
    if let Some(value) = config.override_value {
        return with_column(df, int_column(SAMPLE_SIZE, vec![Some(value); df.height()]));
    }
    let Some(source) = config.column.as_deref() else {
        return Ok(df.clone());
    };
    require_columns(df, &[source])?;

    let raw = text_values(df, source)?;
    let parsed: Vec<Option<i64>> = raw.iter().map(|v| v.as_deref().and_then(parse_count)).collect();
    let keep: Vec<bool> = parsed.iter().map(Option::is_some).collect();
    let dropped: Vec<Option<String>> = raw
        .into_iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(value, _)| value)
        .collect();
    warn_dropped(source, "sample size is missing or not an integer", &dropped);

    let counts: Vec<Option<i64>> = parsed.into_iter().filter(Option::is_some).collect();
    let out = filter_rows(df, &keep)?;
    let out = drop_if_present(&out, source)?;
    with_column(&out, int_column(SAMPLE_SIZE, counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nis_common::i64_values;
    use polars::prelude::*;

    #[test]
    fn counts_parse_with_separators() {
        let df = DataFrame::new(vec![
            Series::new("population_sample_size".into(), vec!["1,204", "88.0", "NA"]).into_column(),
        ])
        .unwrap();
        let config = SampleSizeConfig {
            column: Some("population_sample_size".into()),
            override_value: None,
        };
        let out = clean_sample_size(&df, &config).unwrap();
        assert_eq!(i64_values(&out, SAMPLE_SIZE).unwrap(), vec![Some(1204), Some(88)]);
    }

    #[test]
    fn override_fills_every_row() {
        let df = DataFrame::new(vec![Series::new("x".into(), vec![1i64, 2]).into_column()]).unwrap();
        let config = SampleSizeConfig {
            column: None,
            override_value: Some(500),
        };
        let out = clean_sample_size(&df, &config).unwrap();
        assert_eq!(i64_values(&out, SAMPLE_SIZE).unwrap(), vec![Some(500), Some(500)]);
    }
}
