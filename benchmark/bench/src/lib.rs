//! Candidate ranking for a routine and problem shape, used by the `bench`
//! binary and the criterion benches.

use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use iclblas::routines::*;
use iclblas::{Blob, Config, Dispatcher, FillMode, Handle, Operation, Routine, Side};
use iclblas_base::{ScoreRecord, Selection};
use iclblas_dev::RecordingEngine;
use num_complex::Complex32;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BenchType {
    Sasum,
    Sdot,
    Saxpy,
    Sscal,
    Snrm2,
    Sgemv,
    Sgemm,
    Ssymm,
    Cdotc,
    Scnrm2,
    Scasum,
    Icamin,
    Cgemm,
    Chpr,
}

pub const BENCH_TYPES: [(&str, BenchType); 14] = [
    ("sasum", BenchType::Sasum),
    ("sdot", BenchType::Sdot),
    ("saxpy", BenchType::Saxpy),
    ("sscal", BenchType::Sscal),
    ("snrm2", BenchType::Snrm2),
    ("sgemv", BenchType::Sgemv),
    ("sgemm", BenchType::Sgemm),
    ("ssymm", BenchType::Ssymm),
    ("cdotc", BenchType::Cdotc),
    ("scnrm2", BenchType::Scnrm2),
    ("scasum", BenchType::Scasum),
    ("icamin", BenchType::Icamin),
    ("cgemm", BenchType::Cgemm),
    ("chpr", BenchType::Chpr),
];

pub fn bench_type_from_str(s: &str) -> Option<BenchType> {
    BENCH_TYPES.iter().find(|(name, _)| *name == s).map(|(_, t)| *t)
}

pub fn op_from_char(c: char) -> Operation {
    match c {
        't' | 'T' => Operation::T,
        'c' | 'C' => Operation::C,
        _ => Operation::N,
    }
}

/// Problem shape. Vector routines read `n` and the strides, matrix routines
/// use packed leading dimensions.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Shape {
    pub m: i32,
    pub n: i32,
    pub k: i32,
    pub incx: i32,
    pub incy: i32,
    #[serde(skip)]
    pub transa: Operation,
    #[serde(skip)]
    pub transb: Operation,
    #[serde(skip)]
    pub uplo: FillMode,
    #[serde(skip)]
    pub side: Side,
}

impl Default for Shape {
    fn default() -> Self {
        Shape {
            m: 200,
            n: 200,
            k: 200,
            incx: 1,
            incy: 1,
            transa: Operation::N,
            transb: Operation::N,
            uplo: FillMode::Upper,
            side: Side::Left,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Candidate {
    pub name: &'static str,
    pub total: f32,
    pub fields: Vec<(&'static str, f32)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub routine: &'static str,
    pub shape: Shape,
    pub ranking: Vec<Candidate>,
    /// Mean time of one selection, in nanoseconds.
    pub select_ns: f64,
}

/// Handle over a recording engine, no device needed to rank candidates.
pub fn recording_handle(config: &Config) -> Handle {
    Handle::with_config(Arc::new(RecordingEngine::new()), config)
}

fn candidates<R: Routine>(ranked: Vec<Selection<R>>) -> Vec<Candidate> {
    ranked
        .into_iter()
        .map(|s| Candidate { name: s.name(), total: s.total, fields: s.score.fields() })
        .collect()
}

fn time_select<R: Routine>(d: &Dispatcher, params: &R::Params, n_repeats: usize) -> f64 {
    let start = Instant::now();
    for _ in 0..n_repeats {
        black_box(d.select::<R>(params).ok());
    }
    let elapsed: Duration = start.elapsed();
    elapsed.as_nanos() as f64 / n_repeats.max(1) as f64
}

fn report<R: Routine>(d: &Dispatcher, shape: &Shape, params: &R::Params, n_repeats: usize) -> Report {
    Report {
        routine: R::NAME,
        shape: *shape,
        ranking: candidates(d.rank::<R>(params)),
        select_ns: time_select::<R>(d, params, n_repeats),
    }
}

fn ld(trans: Operation, rows: i32, cols: i32) -> i32 {
    if trans == Operation::N {
        rows.max(1)
    } else {
        cols.max(1)
    }
}

/// Ranks every candidate of `bench` for `shape`.
///
/// Operands are null, scoring looks at dimensions and flags only.
pub fn rank_shape(d: &Dispatcher, bench: BenchType, shape: &Shape, n_repeats: usize) -> Report {
    let Shape { m, n, k, incx, incy, transa, transb, uplo, side } = *shape;
    let one = Complex32::new(1.0, 0.0);
    match bench {
        BenchType::Sasum => report::<Sasum>(
            d,
            shape,
            &SasumParams { n, x: Blob::null(), incx, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Sdot => report::<Sdot>(
            d,
            shape,
            &SdotParams { n, x: Blob::null(), incx, y: Blob::null(), incy, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Saxpy => report::<Saxpy>(
            d,
            shape,
            &SaxpyParams { n, alpha: 1.0, x: Blob::null(), incx, y: Blob::null(), incy },
            n_repeats,
        ),
        BenchType::Sscal => {
            report::<Sscal>(d, shape, &SscalParams { n, alpha: 2.0, x: Blob::null(), incx }, n_repeats)
        }
        BenchType::Snrm2 => report::<Snrm2>(
            d,
            shape,
            &Snrm2Params { n, x: Blob::null(), incx, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Sgemv => report::<Sgemv>(
            d,
            shape,
            &SgemvParams {
                trans: transa,
                m,
                n,
                alpha: 1.0,
                a: Blob::null(),
                lda: m.max(1),
                x: Blob::null(),
                incx,
                beta: 0.0,
                y: Blob::null(),
                incy,
            },
            n_repeats,
        ),
        BenchType::Sgemm => report::<Sgemm>(
            d,
            shape,
            &SgemmParams {
                transa,
                transb,
                m,
                n,
                k,
                alpha: 1.0,
                a: Blob::null(),
                lda: ld(transa, m, k),
                b: Blob::null(),
                ldb: ld(transb, k, n),
                beta: 0.0,
                c: Blob::null(),
                ldc: m.max(1),
            },
            n_repeats,
        ),
        BenchType::Ssymm => report::<Ssymm>(
            d,
            shape,
            &SsymmParams {
                side,
                uplo,
                m,
                n,
                alpha: 1.0,
                a: Blob::null(),
                lda: if side == Side::Left { m.max(1) } else { n.max(1) },
                b: Blob::null(),
                ldb: m.max(1),
                beta: 0.0,
                c: Blob::null(),
                ldc: m.max(1),
            },
            n_repeats,
        ),
        BenchType::Cdotc => report::<Cdotc>(
            d,
            shape,
            &CdotcParams { n, x: Blob::null(), incx, y: Blob::null(), incy, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Scnrm2 => report::<Scnrm2>(
            d,
            shape,
            &Scnrm2Params { n, x: Blob::null(), incx, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Scasum => report::<Scasum>(
            d,
            shape,
            &ScasumParams { n, x: Blob::null(), incx, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Icamin => report::<Icamin>(
            d,
            shape,
            &IcaminParams { n, x: Blob::null(), incx, result: Blob::null() },
            n_repeats,
        ),
        BenchType::Cgemm => report::<Cgemm>(
            d,
            shape,
            &CgemmParams {
                transa,
                transb,
                m,
                n,
                k,
                alpha: one,
                a: Blob::null(),
                lda: ld(transa, m, k),
                b: Blob::null(),
                ldb: ld(transb, k, n),
                beta: one,
                c: Blob::null(),
                ldc: m.max(1),
            },
            n_repeats,
        ),
        BenchType::Chpr => report::<Chpr>(
            d,
            shape,
            &ChprParams { uplo, n, alpha: 1.0, x: Blob::null(), incx, ap: Blob::null() },
            n_repeats,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(report: &Report) -> Vec<&'static str> {
        report.ranking.iter().map(|c| c.name).collect()
    }

    #[test]
    fn parses_bench_types() {
        assert_eq!(bench_type_from_str("sgemm"), Some(BenchType::Sgemm));
        assert_eq!(bench_type_from_str("chpr"), Some(BenchType::Chpr));
        assert_eq!(bench_type_from_str("dgemm"), None);
        assert_eq!(op_from_char('t'), Operation::T);
        assert_eq!(op_from_char('n'), Operation::N);
    }

    #[test]
    fn ranking_is_sorted() {
        let handle = recording_handle(&Config::default());
        let shape = Shape { n: 1 << 22, ..Default::default() };
        let report = rank_shape(handle.dispatcher(), BenchType::Sasum, &shape, 4);
        assert_eq!(report.routine, "Sasum");
        assert_eq!(report.ranking[0].name, "Sasum_simd16_two_stage");
        for w in report.ranking.windows(2) {
            assert!(w[0].total >= w[1].total);
        }
        assert!(report.select_ns >= 0.0);
    }

    #[test]
    fn disabled_candidates_are_not_ranked() {
        let config = Config { disabled: vec!["Sgemm_n3_sg_ntransAB".to_string()], log_ranking: false };
        let handle = recording_handle(&config);
        let report = rank_shape(handle.dispatcher(), BenchType::Sgemm, &Shape::default(), 1);
        assert_eq!(names(&report), vec!["Sgemm_async"]);
    }

    #[test]
    fn report_serializes() {
        let handle = recording_handle(&Config::default());
        let shape = Shape { uplo: FillMode::Lower, ..Default::default() };
        let report = rank_shape(handle.dispatcher(), BenchType::Chpr, &shape, 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["routine"], "Chpr");
        assert_eq!(json["shape"]["n"], 200);
        assert_eq!(json["ranking"].as_array().unwrap().len(), 2);
        assert_eq!(json["ranking"][0]["name"], "Chpr_early_return_simd16x1x1_lower");
    }
}
