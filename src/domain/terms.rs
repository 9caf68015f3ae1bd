/// 理財顧問業的預設搜尋詞，CLI 的 --list-terms 會列出
pub const CURATED_SEARCH_TERMS: [&str; 20] = [
    "Financial Advi",
    "Financial Planning",
    "Wealth Management",
    "Investment Advice",
    "Pension Advice",
    "Financial Consultant",
    "Financial Adviser",
    "Financial Advisor",
    "IFA",
    "Independent Financial",
    "Wealth Adviser",
    "Wealth Advisor",
    "Pension Consultant",
    "Investment Consultant",
    "Financial Services",
    "Wealth Planning",
    "Retirement Planning",
    "Financial Guidance",
    "Financial Solutions",
    "Financial Expertise",
];
