//! # marker-statistics
//!
//! Differential expression of gene-expression markers between two sample groups, part of the
//! single-rust ecosystem.
//!
//! This crate runs one fixed analysis: every marker column of a samples × markers table is tested
//! with Welch's unequal-variance t-test on standardized values, its log2 fold change is computed
//! from the raw group means, and the resulting p-values are corrected for multiple testing in three
//! independent ways before the significant markers are collected and prepared for plotting.
//!
//! ## Core Features
//!
//! - **Differential Expression Analysis**: Welch t-tests and log2 fold changes per marker
//! - **Multiple Testing Correction**: per-family alpha threshold, Bonferroni, and a rank-based FDR
//! - **Significance Filtering**: four independent significant-marker sets
//! - **Visualization Tables**: volcano points and a standardized intensity sub-table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marker_statistics::config::AnalysisConfig;
//! use marker_statistics::pipeline::run_analysis_from_path;
//!
//! let report = run_analysis_from_path("GeneExpressionData.txt", &AnalysisConfig::default())?;
//! println!("{} Bonferroni-significant markers", report.significant.bonferroni.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! - **[`data`]**: Marker tables, group labels, standardization, and descriptive summaries
//! - **[`testing`]**: Group partitioning, Welch tests, fold changes, corrections, and filtering
//! - **[`visualization`]**: Plot-ready volcano and intensity-map tables
//! - **[`pipeline`]**: The end-to-end analysis
//! - **[`io`]**: Delimited-text input and output

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod testing;
pub mod visualization;
