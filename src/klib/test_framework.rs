//! Framework de testes do kernel
//!
//! Usado pelos self-tests que rodam no hardware real durante o boot
//! (feature `self_test`). Os testes de host usam o harness padrão.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed,
    Skipped,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Contagem final de uma suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> SuiteSummary {
    crate::kinfo!("=== Suite:");
    crate::kinfo!(name);

    let mut summary = SuiteSummary::default();
    for test in tests {
        match (test.func)() {
            TestResult::Passed => {
                crate::kok!(test.name);
                summary.passed += 1;
            }
            TestResult::Failed => {
                crate::kerror!(test.name);
                summary.failed += 1;
            }
            TestResult::Skipped => {
                crate::kwarn!(test.name);
                summary.skipped += 1;
            }
        }
    }

    crate::kinfo!("Resultados: passed=", summary.passed);
    if summary.failed > 0 {
        crate::kerror!("Resultados: failed=", summary.failed);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> TestResult {
        TestResult::Passed
    }
    fn bad() -> TestResult {
        TestResult::Failed
    }
    fn skip() -> TestResult {
        TestResult::Skipped
    }

    #[test]
    fn test_suite_counts_results() {
        let cases = [
            TestCase::new("ok", ok),
            TestCase::new("bad", bad),
            TestCase::new("skip", skip),
            TestCase::new("ok2", ok),
        ];
        let summary = run_test_suite("contagem", &cases);
        assert_eq!(
            summary,
            SuiteSummary {
                passed: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(!summary.all_passed());
    }
}
