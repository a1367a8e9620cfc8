//! Testes do Scheduler (self-test no hardware)
//!
//! Rodam em `kernel_main`, na thread `main`, antes das threads de
//! trabalho existirem.

use crate::arch::x86_64::X64Cpu;
use crate::arch::CpuOps;
use crate::klib::test_framework::{run_test_suite, SuiteSummary, TestCase, TestResult};
use crate::sched::task::TaskStatus;
use crate::sys::Pid;

/// Casos de teste do Scheduler
const SCHED_TESTS: &[TestCase] = &[
    TestCase::new("running_on_own_stack", test_running_on_own_stack),
    TestCase::new("bootstrap_pid", test_bootstrap_pid),
    TestCase::new("pid_after_thread_start", test_pid_after_thread_start),
    TestCase::new("canary_after_yield", test_canary_after_yield),
];

/// Executa todos os testes de scheduler
pub fn run_sched_tests() -> SuiteSummary {
    run_test_suite("Scheduler", SCHED_TESTS)
}

/// O RSP atual cai na pilha registrada da task corrente.
fn test_running_on_own_stack() -> TestResult {
    let rsp = X64Cpu::stack_pointer();
    let (current, owner) = match (super::current(), super::owner_of_stack(rsp)) {
        (Ok(current), Ok(owner)) => (current, owner),
        _ => return TestResult::Skipped,
    };
    if owner != Some(current) {
        crate::kerror!("(Sched) RSP fora da pilha da task corrente: ", rsp);
        return TestResult::Failed;
    }
    TestResult::Passed
}

/// A thread de boot foi adotada como `main` com o PID 1.
fn test_bootstrap_pid() -> TestResult {
    match super::current_pid() {
        Ok(pid) if pid == Pid::BOOTSTRAP => TestResult::Passed,
        Ok(pid) => {
            crate::kerror!("(Sched) PID da main inesperado: ", pid.as_u32());
            TestResult::Failed
        }
        Err(_) => TestResult::Skipped,
    }
}

/// Thread descartável: se estaciona na primeira vez que roda.
fn parked_thread(_arg: usize) {
    loop {
        if super::block_current(TaskStatus::Hanging).is_err() {
            X64Cpu::hang();
        }
    }
}

/// Uma thread criada agora recebe PID acima do último entregue.
fn test_pid_after_thread_start() -> TestResult {
    let before = match super::last_pid() {
        Ok(last) => last,
        Err(_) => return TestResult::Skipped,
    };
    let id = match super::thread_start("selftest", 1, parked_thread, 0) {
        Ok(id) => id,
        Err(err) => {
            crate::kerror!(err.as_str());
            return TestResult::Failed;
        }
    };
    match (super::pid_of(id), super::last_pid()) {
        (Ok(pid), Ok(last)) if pid.as_u32() > before && pid.as_u32() == last => TestResult::Passed,
        (Ok(pid), _) => {
            crate::kerror!("(Sched) PID nao monotonico: ", pid.as_u32());
            TestResult::Failed
        }
        _ => TestResult::Failed,
    }
}

/// Cede a CPU de verdade e confere o canário na volta.
fn test_canary_after_yield() -> TestResult {
    let before = match super::context_switches() {
        Ok(n) => n,
        Err(_) => return TestResult::Skipped,
    };
    if super::yield_now().is_err() {
        return TestResult::Failed;
    }
    let after = super::context_switches().unwrap_or(before);
    match super::current_canary_intact() {
        Ok(true) => {
            crate::ktrace!("(Sched) trocas no yield=", after - before);
            TestResult::Passed
        }
        _ => TestResult::Failed,
    }
}
