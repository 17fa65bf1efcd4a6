//! Dense factorization and condition kernels behind a backend trait.
//!
//! Every routine follows the LAPACK calling convention it is named after:
//! matrices are column-major buffers with an explicit leading dimension,
//! results are written in place, and the return value is the `info` code
//! (`0` on success, `-i` when argument `i` is invalid, `> 0` for a
//! numerical failure described per routine). Unlike LAPACK, pivot indices
//! are zero-based.
//!
//! [`ActiveKernel`] is the single point of backend selection. The crate
//! ships [`NativeKernel`], a pure Rust implementation for `f32`, `f64`,
//! `Complex<f32>` and `Complex<f64>`.
//!
//! # Example
//!
//! ```rust
//! use linext_kernel::{ActiveKernel, Kernel, Trans};
//!
//! // [[2, 1], [1, 3]] in column-major order.
//! let mut a = vec![2.0f64, 1.0, 1.0, 3.0];
//! let mut ipiv = [0usize; 2];
//! assert_eq!(<ActiveKernel as Kernel<f64>>::getrf(2, 2, &mut a, 2, &mut ipiv), 0);
//!
//! let mut b = vec![3.0, 4.0];
//! <ActiveKernel as Kernel<f64>>::getrs(Trans::NoTrans, 2, 1, &a, 2, &ipiv, &mut b, 2);
//! assert!((b[0] - 1.0).abs() < 1e-12 && (b[1] - 1.0).abs() < 1e-12);
//! ```

pub mod native;

pub use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};

/// Maximum number of sweeps of the one-sided Jacobi SVD.
pub const JACOBI_MAX_SWEEPS: usize = 60;

/// Iteration cap of the Hager/Higham 1-norm estimator.
pub const CONDITION_ESTIMATE_MAX_ITER: usize = 5;

/// Balancing scales are powers of this radix so balancing is exact.
pub const BALANCE_RADIX: f64 = 2.0;

/// A row/column pair is rescaled only if its combined norm drops below this
/// fraction of the original.
pub const BALANCE_FACTOR: f64 = 0.95;

/// Iteration cap of the pair-balancing equilibration.
pub const PAIR_BALANCE_MAX_ITER: usize = 32;

// ---------------------------------------------------------------------------
// Job codes
// ---------------------------------------------------------------------------

/// `op(A)` applied by a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trans {
    NoTrans,
    Trans,
    ConjTrans,
}

/// Side from which an operator is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Matrix norm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormKind {
    /// Maximum column sum.
    One,
    /// Maximum row sum.
    Inf,
    /// Largest modulus.
    Max,
    Frobenius,
}

/// What a balancing routine does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalanceJob {
    Nothing,
    Permute,
    Scale,
    Both,
}

impl BalanceJob {
    #[inline]
    pub fn permutes(self) -> bool {
        matches!(self, BalanceJob::Permute | BalanceJob::Both)
    }

    #[inline]
    pub fn scales(self) -> bool {
        matches!(self, BalanceJob::Scale | BalanceJob::Both)
    }
}

/// Which singular vectors an SVD computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvdJob {
    /// All `m` left (or `n` right) vectors.
    Full,
    /// The leading `min(m, n)` vectors.
    Thin,
    /// No vectors.
    Skip,
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A provider of the dense kernels used by the linear-algebra bindings.
///
/// Matrices are column-major with leading dimension `ld* >= max(1, rows)`.
/// Routines whose LAPACK counterpart takes a factored matrix (`sycon`,
/// `hecon`, `gbcon`) take the original matrix here and factor it
/// internally.
#[allow(clippy::too_many_arguments)]
pub trait Kernel<T: Scalar> {
    /// LU factorization with partial pivoting, `P A = L U`.
    ///
    /// Row `i` was interchanged with row `ipiv[i]`. Returns `i + 1` if
    /// `U(i, i)` is exactly zero; the factorization is still completed.
    fn getrf(m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [usize]) -> i32;

    /// Solve `op(A) X = B` with the factors from [`Kernel::getrf`].
    fn getrs(
        trans: Trans,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        ipiv: &[usize],
        b: &mut [T],
        ldb: usize,
    ) -> i32;

    /// Reciprocal condition estimate from LU factors and the norm of `A`.
    fn gecon(
        norm: NormKind,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32;

    fn lange(norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T::Real;

    /// Householder QR. `R` is left on and above the diagonal, the
    /// reflectors below it with scalars in `tau`.
    fn geqrf(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32;

    /// Overwrite the reflectors with the `m x n` matrix `Q` built from the
    /// first `k` of them.
    fn ungqr(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32;

    /// `C := op(Q) C` or `C op(Q)`. The diagonal of `a` is overwritten
    /// while a reflector is applied and restored afterwards.
    fn unmqr(
        side: Side,
        trans: Trans,
        m: usize,
        n: usize,
        k: usize,
        a: &mut [T],
        lda: usize,
        tau: &[T],
        c: &mut [T],
        ldc: usize,
    ) -> i32;

    /// Householder QL. The reflectors sit above the last `min(m, n)`
    /// anti-diagonal entries.
    fn geqlf(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32;

    /// `Q` of a QL factorization from the reflectors in the last `k`
    /// columns of `a`.
    fn ungql(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32;

    /// Apply the `Q` of a QL factorization; reflector `i` is column `i` of `a`.
    fn unmql(
        side: Side,
        trans: Trans,
        m: usize,
        n: usize,
        k: usize,
        a: &mut [T],
        lda: usize,
        tau: &[T],
        c: &mut [T],
        ldc: usize,
    ) -> i32;

    /// Singular value decomposition `A = U diag(s) VT`, with `s`
    /// non-increasing. `a` is destroyed. Returns the number of column pairs
    /// left unconverged.
    fn gesvd(
        jobu: SvdJob,
        jobvt: SvdJob,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        s: &mut [T::Real],
        u: &mut [T],
        ldu: usize,
        vt: &mut [T],
        ldvt: usize,
    ) -> i32;

    /// Balance a square matrix. On exit `scale[i]` holds the interchange
    /// index for `i` outside `ilo..=ihi` and the scaling factor inside it.
    fn gebal(
        job: BalanceJob,
        n: usize,
        a: &mut [T],
        lda: usize,
        ilo: &mut usize,
        ihi: &mut usize,
        scale: &mut [T::Real],
    ) -> i32;

    /// Undo [`Kernel::gebal`] on the rows of an `n x m` matrix `v`.
    fn gebak(
        job: BalanceJob,
        side: Side,
        n: usize,
        ilo: usize,
        ihi: usize,
        scale: &[T::Real],
        m: usize,
        v: &mut [T],
        ldv: usize,
    ) -> i32;

    /// Balance the pencil `(A, B)` by an equivalence transformation.
    fn ggbal(
        job: BalanceJob,
        n: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        ilo: &mut usize,
        ihi: &mut usize,
        lscale: &mut [T::Real],
        rscale: &mut [T::Real],
    ) -> i32;

    /// Undo [`Kernel::ggbal`] on the rows of an `n x m` matrix `v`.
    fn ggbak(
        job: BalanceJob,
        side: Side,
        n: usize,
        ilo: usize,
        ihi: usize,
        lscale: &[T::Real],
        rscale: &[T::Real],
        m: usize,
        v: &mut [T],
        ldv: usize,
    ) -> i32;

    /// Cholesky factorization of a Hermitian positive definite matrix.
    /// Returns `i + 1` if the leading minor of order `i + 1` is not
    /// positive definite.
    fn potrf(uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32;

    fn potrs(
        uplo: Uplo,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32;

    /// 1-norm reciprocal condition estimate from a Cholesky factor.
    fn pocon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32;

    /// Triangular solve; returns `i + 1` on an exact zero diagonal entry.
    fn trtrs(
        uplo: Uplo,
        trans: Trans,
        diag: DiagKind,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32;

    fn trcon(
        norm: NormKind,
        uplo: Uplo,
        diag: DiagKind,
        n: usize,
        a: &[T],
        lda: usize,
        rcond: &mut T::Real,
    ) -> i32;

    /// Condition estimate of a symmetric matrix stored in one triangle.
    fn sycon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32;

    /// Condition estimate of a Hermitian matrix stored in one triangle.
    fn hecon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32;

    /// Condition estimate of a band matrix in LAPACK band storage:
    /// `A(i, j) = ab[ku + i - j + j * ldab]`.
    fn gbcon(
        norm: NormKind,
        n: usize,
        kl: usize,
        ku: usize,
        ab: &[T],
        ldab: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32;

    /// Least squares (`m >= n`) or minimum norm (`m < n`) solution of
    /// `A X = B` for full-rank `A`. `b` has `ldb >= max(m, n)` rows.
    fn gels(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32;

    /// Minimum norm least squares solution through the SVD. Singular
    /// values at or below `rcond * s[0]` are treated as zero; a negative
    /// `rcond` means machine epsilon.
    fn gelss(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        s: &mut [T::Real],
        rcond: T::Real,
        rank: &mut usize,
    ) -> i32;
}

/// Pure Rust kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKernel;

/// The kernel used by the linear-algebra bindings.
pub type ActiveKernel = NativeKernel;

impl<T: Scalar> Kernel<T> for NativeKernel {
    fn getrf(m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [usize]) -> i32 {
        native::lu::getrf(m, n, a, lda, ipiv)
    }

    fn getrs(
        trans: Trans,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        ipiv: &[usize],
        b: &mut [T],
        ldb: usize,
    ) -> i32 {
        native::lu::getrs(trans, n, nrhs, a, lda, ipiv, b, ldb)
    }

    fn gecon(
        norm: NormKind,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32 {
        native::lu::gecon(norm, n, a, lda, anorm, rcond)
    }

    fn lange(norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
        native::norm::lange(norm, m, n, a, lda)
    }

    fn geqrf(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32 {
        native::qr::geqrf(m, n, a, lda, tau)
    }

    fn ungqr(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32 {
        native::qr::ungqr(m, n, k, a, lda, tau)
    }

    fn unmqr(
        side: Side,
        trans: Trans,
        m: usize,
        n: usize,
        k: usize,
        a: &mut [T],
        lda: usize,
        tau: &[T],
        c: &mut [T],
        ldc: usize,
    ) -> i32 {
        native::qr::unmqr(side, trans, m, n, k, a, lda, tau, c, ldc)
    }

    fn geqlf(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32 {
        native::ql::geqlf(m, n, a, lda, tau)
    }

    fn ungql(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32 {
        native::ql::ungql(m, n, k, a, lda, tau)
    }

    fn unmql(
        side: Side,
        trans: Trans,
        m: usize,
        n: usize,
        k: usize,
        a: &mut [T],
        lda: usize,
        tau: &[T],
        c: &mut [T],
        ldc: usize,
    ) -> i32 {
        native::ql::unmql(side, trans, m, n, k, a, lda, tau, c, ldc)
    }

    fn gesvd(
        jobu: SvdJob,
        jobvt: SvdJob,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        s: &mut [T::Real],
        u: &mut [T],
        ldu: usize,
        vt: &mut [T],
        ldvt: usize,
    ) -> i32 {
        native::svd::gesvd(jobu, jobvt, m, n, a, lda, s, u, ldu, vt, ldvt)
    }

    fn gebal(
        job: BalanceJob,
        n: usize,
        a: &mut [T],
        lda: usize,
        ilo: &mut usize,
        ihi: &mut usize,
        scale: &mut [T::Real],
    ) -> i32 {
        native::balance::gebal(job, n, a, lda, ilo, ihi, scale)
    }

    fn gebak(
        job: BalanceJob,
        side: Side,
        n: usize,
        ilo: usize,
        ihi: usize,
        scale: &[T::Real],
        m: usize,
        v: &mut [T],
        ldv: usize,
    ) -> i32 {
        native::balance::gebak(job, side, n, ilo, ihi, scale, m, v, ldv)
    }

    fn ggbal(
        job: BalanceJob,
        n: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        ilo: &mut usize,
        ihi: &mut usize,
        lscale: &mut [T::Real],
        rscale: &mut [T::Real],
    ) -> i32 {
        native::balance::ggbal(job, n, a, lda, b, ldb, ilo, ihi, lscale, rscale)
    }

    fn ggbak(
        job: BalanceJob,
        side: Side,
        n: usize,
        ilo: usize,
        ihi: usize,
        lscale: &[T::Real],
        rscale: &[T::Real],
        m: usize,
        v: &mut [T],
        ldv: usize,
    ) -> i32 {
        native::balance::ggbak(job, side, n, ilo, ihi, lscale, rscale, m, v, ldv)
    }

    fn potrf(uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32 {
        native::cholesky::potrf(uplo, n, a, lda)
    }

    fn potrs(
        uplo: Uplo,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32 {
        native::cholesky::potrs(uplo, n, nrhs, a, lda, b, ldb)
    }

    fn pocon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32 {
        native::cholesky::pocon(uplo, n, a, lda, anorm, rcond)
    }

    fn trtrs(
        uplo: Uplo,
        trans: Trans,
        diag: DiagKind,
        n: usize,
        nrhs: usize,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32 {
        native::triangular::trtrs(uplo, trans, diag, n, nrhs, a, lda, b, ldb)
    }

    fn trcon(
        norm: NormKind,
        uplo: Uplo,
        diag: DiagKind,
        n: usize,
        a: &[T],
        lda: usize,
        rcond: &mut T::Real,
    ) -> i32 {
        native::triangular::trcon(norm, uplo, diag, n, a, lda, rcond)
    }

    fn sycon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32 {
        native::structured::sycon(uplo, n, a, lda, anorm, rcond)
    }

    fn hecon(
        uplo: Uplo,
        n: usize,
        a: &[T],
        lda: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32 {
        native::structured::hecon(uplo, n, a, lda, anorm, rcond)
    }

    fn gbcon(
        norm: NormKind,
        n: usize,
        kl: usize,
        ku: usize,
        ab: &[T],
        ldab: usize,
        anorm: T::Real,
        rcond: &mut T::Real,
    ) -> i32 {
        native::structured::gbcon(norm, n, kl, ku, ab, ldab, anorm, rcond)
    }

    fn gels(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> i32 {
        native::lstsq::gels(m, n, nrhs, a, lda, b, ldb)
    }

    fn gelss(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        s: &mut [T::Real],
        rcond: T::Real,
        rank: &mut usize,
    ) -> i32 {
        native::lstsq::gelss(m, n, nrhs, a, lda, b, ldb, s, rcond, rank)
    }
}
