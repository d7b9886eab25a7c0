pub mod basic;
pub mod monthly;
pub mod summary;

use clap::ValueEnum;
use common::monthly::MonthLayout;

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// 最小〜最大の観測月のみ（先頭が最小月）
    Observed,
    /// 常に 12 ヶ月（index = 月 - 1）
    Calendar,
}

impl From<LayoutArg> for MonthLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Observed => MonthLayout::Observed,
            LayoutArg::Calendar => MonthLayout::Calendar,
        }
    }
}
