//! Keyword and vocabulary conventions.
//!
//! Pure constants shared by every crate. Role keywords are the keywords of
//! the analysis services AST analyses are created from; the vocabularies are
//! the `code:label` choice strings assigned to their interim fields.

/// Analysis service keywords, one per AST role.
pub mod role {
    pub const IDENTIFICATION: &str = "senaite_ast_identification";
    pub const BREAKPOINTS_TABLE: &str = "senaite_ast_breakpoint";
    pub const ZONE_SIZE: &str = "senaite_ast_zone";
    pub const MIC_VALUE: &str = "senaite_ast_mic";
    pub const DISK_CONTENT: &str = "senaite_ast_potency";
    pub const RESISTANCE: &str = "senaite_ast_resistance";
    pub const REPORT: &str = "senaite_ast_report";
    pub const REPORT_EXTRAPOLATED: &str = "senaite_ast_report_extrapolated";
}

/// Choice vocabularies.
pub mod vocabulary {
    /// Sensitivity categories. Codes are fixed once and never recomputed.
    pub const SENSITIVITY: &str = "0:|1:S|2:I|3:R";

    /// Selective reporting flag.
    pub const REPORT: &str = "0:|1:Y|2:N";

    /// Code of the "Y" choice in [`REPORT`].
    pub const REPORT_YES: &str = "1";

    /// Code of the "N" choice in [`REPORT`].
    pub const REPORT_NO: &str = "2";
}

/// "Not Tested" markers written by antibiotic rejection.
pub mod not_tested {
    /// Code inserted into choice-coded fields.
    pub const CODE: &str = "-1";

    /// Label of the inserted choice.
    pub const LABEL: &str = "Not Tested";

    /// Raw value written into free-text fields.
    pub const TEXT: &str = "NT";

    /// Result type stamped on free-text fields once flagged.
    pub const RESULT_TYPE: &str = "string";
}

/// Value of a breakpoints-table interim meaning "no table selected".
pub const UNSET_TABLE: &str = "0";

/// First result option of the microorganism identification analysis.
pub const NO_CULTURE_GROWTH: &str = "No culture growth obtained";
