//! # gapseek
//!
//! 基于 Aho–Corasick 种子自动机的带间隙 DNA motif 多模式搜索。
//!
//! 自动机只能识别连续的字面子串，因此每个模式先被拆成 token（字面段 / 定长间隙），
//! 取足够长的字面段作为种子建自动机；扫描文本时每个种子命中都会锚定一个候选起点，
//! 再按完整 token 序列回放验证。
//!
//! - **模式解析**：`ACGTN` 字面段、`.` / `{k}` 间隙，宽松或严格的错误策略
//! - **种子抽取**：长度阈值 + 回退到第一个字面段
//! - **自动机**：稠密 arena、完整转移表、一次性闭包的输出集合
//! - **扫描与验证**：惰性的种子命中迭代器、以种子为锚的间隙验证、可选的分窗并行
//!
//! ## 快速示例
//!
//! ```rust
//! use gapseek::index::{IndexOpt, MotifIndex};
//! use gapseek::search::{search, SearchOpt};
//!
//! let index = MotifIndex::build(&["AC.T", "GG{2}TA"], IndexOpt::default()).unwrap();
//! let report = search(&index, b"ACGTACGTNN", &SearchOpt::default());
//!
//! assert_eq!(report.total_matches(), 2);
//! assert_eq!(report.matches.by_pattern()[&0], vec![(0, 4), (4, 8)]);
//! ```
//!
//! ## 模块说明
//!
//! - [`util`] — DNA 字母表与规范化
//! - [`pattern`] — 模式 token 化与种子抽取
//! - [`index`] — 种子自动机、编译后的模式索引、DOT 导出
//! - [`search`] — 扫描、验证、结果收集
//! - [`io`] — FASTA / 模式文件读取，结果输出
//! - [`tools`] — 随机模式生成、序列差异比较

pub mod index;
pub mod io;
pub mod pattern;
pub mod search;
pub mod tools;
pub mod util;
