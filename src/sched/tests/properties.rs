//! Propriedades do escalonador: contagem das filas, justiça FIFO,
//! transições de estado, PIDs e canários.

use super::*;
use crate::mm::AddressSpace;
use crate::sched::config::STACK_MAGIC;
use crate::sys::Pid;

#[test]
fn test_creation_grows_both_lists_by_n() {
    let mut sched = boot();
    let ready_before = sched.ready_len();
    let all_before = sched.task_count();

    let ids = spawn(&mut sched, &["a", "b", "c", "d", "e", "f", "g"], 3);

    assert_eq!(sched.ready_len(), ready_before + ids.len());
    assert_eq!(sched.task_count(), all_before + ids.len());

    let mut ready = sched.ready_snapshot();
    ready.sort();
    ready.dedup();
    assert_eq!(ready.len(), sched.ready_len());
    let mut all = sched.all_snapshot();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), sched.task_count());

    // main + idle + 7, cada uma com a sua pilha
    assert_eq!(sched.pages().pages_in_use(), (1 + ids.len()) * KERNEL_STACK_PAGES);
}

#[test]
fn test_fifo_order_ignores_priority() {
    let mut sched = boot();
    let t: Vec<TaskId> = [("A", 3), ("B", 7), ("C", 1)]
        .iter()
        .map(|&(name, priority)| sched.thread_start(name, priority, worker, 0).unwrap())
        .collect();

    // main sai de cena; A roda
    sched.block(TaskStatus::Blocked).unwrap();
    assert_eq!(sched.current(), t[0]);

    let mut order = Vec::new();
    let mut slices = Vec::new();
    let mut slice = 0;
    let mut last = sched.current();
    while order.len() < 9 {
        sched.tick();
        slice += 1;
        if sched.current() != last {
            order.push(last);
            slices.push(slice);
            slice = 0;
            last = sched.current();
        }
    }

    assert_eq!(order, [t[0], t[1], t[2], t[0], t[1], t[2], t[0], t[1], t[2]]);
    // A fatia é prioridade + 1 ticks: o tick que chega com 0 despacha
    assert_eq!(slices, [4, 8, 2, 4, 8, 2, 4, 8, 2]);
}

#[test]
fn test_block_unblock_transitions() {
    let mut sched = boot();
    let main = main_task(&sched);
    let t = spawn(&mut sched, &["T1", "T2"], 2);

    sched.schedule();
    assert_eq!(sched.current(), t[0]);
    sched.block(TaskStatus::Blocked).unwrap();
    assert_eq!(status(&sched, t[0]), TaskStatus::Blocked);

    sched.unblock(t[0]).unwrap();
    assert_eq!(status(&sched, t[0]), TaskStatus::Ready);
    let occurrences = sched.ready_iter().filter(|&id| id == t[0]).count();
    assert_eq!(occurrences, 1);
    assert_eq!(sched.ready_snapshot(), [t[0], main]);

    // T2 cede; T1 volta a rodar
    sched.yield_now();
    assert_eq!(sched.current(), t[0]);
    assert_eq!(status(&sched, t[0]), TaskStatus::Running);
    assert_eq!(sched.ready_snapshot(), [main, t[1]]);
}

#[test]
fn test_pids_strictly_increasing() {
    let mut sched = boot();
    let names: Vec<String> = (0..20).map(|i| format!("w{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let ids = spawn(&mut sched, &refs, 1);

    let pids: Vec<u32> = ids.iter().map(|&id| sched.task(id).unwrap().pid.as_u32()).collect();
    assert!(pids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(pids[0], 3);
    assert_eq!(sched.pids().last(), 22);
}

#[test]
fn test_canaries_survive_many_switches() {
    let mut sched = boot();
    let t = spawn(&mut sched, &["A", "B", "C", "D"], 2);

    for round in 0..400 {
        sched.tick();
        if round % 37 == 0 {
            sched.yield_now();
        }
        if round % 53 == 0 && sched.current() == t[1] {
            sched.block(TaskStatus::Blocked).unwrap();
            sched.unblock(t[1]).unwrap();
        }
    }

    assert!(sched.context_switches() > 30);
    for id in sched.all_snapshot() {
        let task = sched.task(id).unwrap();
        assert!(task.canary_intact(), "pid {}", task.pid.as_u32());
        assert_eq!(task.stack.canary(), STACK_MAGIC);
    }
}

#[test]
fn test_switch_sees_bookkeeping_already_committed() {
    let mut sched = boot();
    let main = main_task(&sched);
    let t = spawn(&mut sched, &["A"], 3);
    let load = sched.task(t[0]).unwrap().kernel_stack_pointer;

    sched.yield_now();

    let save = &sched.task(main).unwrap().kernel_stack_pointer as *const usize as usize;
    assert_eq!(MockCpu::last_switch(), Some((save, load)));
    assert_eq!(sched.current(), t[0]);
    assert_eq!(sched.context_switches(), 1);
    assert_eq!(status(&sched, t[0]), TaskStatus::Running);
    assert_eq!(status(&sched, main), TaskStatus::Ready);
}

#[test]
fn test_initial_frame_is_inside_stack() {
    let mut sched = boot();
    let id = sched.thread_start("w", 4, worker, 0xABCD).unwrap();
    let task = sched.task(id).unwrap();

    let (sp, entry, arg) = *MockCpu::frames().last().unwrap();
    assert_eq!(task.kernel_stack_pointer, sp);
    assert!(task.stack.contains(sp));
    assert_eq!(entry, worker as usize);
    assert_eq!(arg, 0xABCD);
    // O frame fica no topo, longe do canário
    assert!(sp > task.stack.base() + task.stack.size() / 2);
}

#[test]
fn test_tick_accounting() {
    let mut sched = boot();
    let main = main_task(&sched);
    spawn(&mut sched, &["A"], 2);

    sched.tick();
    sched.tick();
    let task = sched.task(main).unwrap();
    assert_eq!(task.elapsed_ticks, 2);
    assert_eq!(task.ticks, 29);
    assert_eq!(sched.current(), main);
}

#[test]
fn test_yield_alone_keeps_running_without_switch() {
    let mut sched = boot();
    let main = main_task(&sched);

    sched.yield_now();

    assert_eq!(sched.current(), main);
    assert_eq!(status(&sched, main), TaskStatus::Running);
    assert_eq!(sched.context_switches(), 0);
    assert!(MockCpu::switches().is_empty());
}

#[test]
fn test_address_space_loaded_only_on_change() {
    let mut sched = boot();
    let t = spawn(&mut sched, &["user", "k1", "k2"], 1);
    let aspace = AddressSpace::new(0x7000);
    sched.set_address_space(t[0], Some(aspace)).unwrap();

    sched.block(TaskStatus::Blocked).unwrap();
    assert_eq!(sched.current(), t[0]);
    assert_eq!(sched.active_address_space(), Some(aspace));
    assert_eq!(MockCpu::address_space_loads(), [Some(aspace)]);

    sched.yield_now();
    assert_eq!(sched.current(), t[1]);
    sched.yield_now();
    assert_eq!(sched.current(), t[2]);

    // k1 volta ao kernel, k2 já está nele
    assert_eq!(MockCpu::address_space_loads(), [Some(aspace), None]);
}

#[test]
fn test_lookups() {
    let mut sched = boot();
    let main = main_task(&sched);
    let t = spawn(&mut sched, &["net", "disk", "net"], 1);

    // Nomes não são únicos: vence o primeiro criado
    assert_eq!(sched.find_by_name("net"), Some(t[0]));
    assert_eq!(sched.find_by_name("disk"), Some(t[1]));
    assert_eq!(sched.find_by_name("nada"), None);

    let pid = sched.task(t[2]).unwrap().pid;
    assert_eq!(sched.find_by_pid(pid), Some(t[2]));

    let inside = sched.task(t[1]).unwrap().stack.base() + 100;
    assert_eq!(sched.owner_of_stack(inside), Some(t[1]));
    let boot_sp = sched.task(main).unwrap().stack.top() - 8;
    assert_eq!(sched.owner_of_stack(boot_sp), Some(main));
    assert_eq!(sched.owner_of_stack(0x10), None);
}

#[test]
fn test_live_state_matches_running_task() {
    let mut sched = boot();
    assert_eq!(sched.current_task().pid, Pid::BOOTSTRAP);

    let before = sched.pids().last();
    let t = spawn(&mut sched, &["w"], 2)[0];
    assert!(sched.task(t).unwrap().pid.as_u32() > before);
    assert_eq!(sched.task(t).unwrap().pid.as_u32(), sched.pids().last());

    // Depois da troca, o stack pointer carregado pertence à corrente
    sched.yield_now();
    let (_, loaded) = MockCpu::last_switch().unwrap();
    assert_eq!(sched.current(), t);
    assert_eq!(sched.owner_of_stack(loaded), Some(sched.current()));
    assert!(sched.current_task().stack.contains(loaded));
}
