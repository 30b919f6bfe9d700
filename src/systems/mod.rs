mod budget;
mod calendar;
mod happiness;
mod population;
mod utilities;

pub use budget::BudgetSystem;
pub use calendar::CalendarSystem;
pub use happiness::HappinessSystem;
pub use population::PopulationSystem;
pub use utilities::UtilitySystem;
