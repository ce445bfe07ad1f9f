use serde::{Deserialize, Serialize};

/// One step of the post-AM deduction chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionStage {
    /// Personfradrag.
    PersonalAllowance,
    /// Beskæftigelsesfradrag.
    EmploymentDeduction,
    /// Jobfradrag.
    JobDeduction,
    /// Caller-supplied flat deductions.
    OtherDeductions,
}

/// The order in which deductions draw on personal income after AM.
///
/// Each stage only gets what the stages before it left over, so when income
/// runs out the later stages are the ones truncated. Keep this order.
pub const DEDUCTION_ORDER: [DeductionStage; 4] = [
    DeductionStage::PersonalAllowance,
    DeductionStage::EmploymentDeduction,
    DeductionStage::JobDeduction,
    DeductionStage::OtherDeductions,
];

impl DeductionStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonalAllowance => "Personfradrag",
            Self::EmploymentDeduction => "Beskæftigelsesfradrag",
            Self::JobDeduction => "Jobfradrag",
            Self::OtherDeductions => "Other deductions",
        }
    }
}
