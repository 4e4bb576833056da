use crate::{Answers, Category, Language, Question};

/// Lowest y-axis maximum of the chart; the usual top of the answer scale.
pub const MIN_SCALE_MAX: f64 = 5.0;

/// One bar of the answers chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartBar {
    pub label: String,
    /// Average answer of the category, `0.0` when none of its questions is answered.
    pub value: f64,
    /// Number of answered questions that went into the average.
    pub answered: usize,
}

/// Data shown by the bar chart: one bar per category, in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub bars: Vec<ChartBar>,
    pub scale_max: f64,
}

impl ChartData {
    /// Average the given answers per category.
    pub fn from_answers(
        answers: &Answers,
        questions: &[Question],
        categories: &[Category],
        language: Language,
    ) -> Self {
        let bars: Vec<ChartBar> = categories
            .iter()
            .map(|category| {
                let values: Vec<f64> = category
                    .questions(questions)
                    .filter_map(|q| answers.get(&q.id))
                    .map(|&v| f64::from(v))
                    .collect();
                let value = if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                };
                ChartBar {
                    label: category.label(language).to_string(),
                    value,
                    answered: values.len(),
                }
            })
            .collect();

        let highest = answers.values().copied().max().map(f64::from).unwrap_or(0.0);
        Self {
            bars,
            scale_max: highest.max(MIN_SCALE_MAX),
        }
    }

    /// Create chart data with no bars.
    pub fn empty() -> Self {
        Self {
            bars: Vec::new(),
            scale_max: MIN_SCALE_MAX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
