mod analyzer;

pub use self::analyzer::{create_shared_analyzer, SharedAnalyzer, SpectrumData, NUM_BANDS};
