pub mod error;
pub mod frequency;
pub mod granularity;
pub mod observation;
pub mod period;
pub mod plot_type;
pub mod reference_date;
pub mod variable;
