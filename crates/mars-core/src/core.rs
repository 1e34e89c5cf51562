//! The circular memory core, the two per-warrior process queues, and the
//! traced cell-mutation helpers used by the execution unit.
//!
//! A `Core` lives for exactly one round. Every address handed to it is
//! reduced modulo the core size, and every field it stores is normalized
//! into `[0, core_size)`, so cells can never hold out-of-range values
//! between instructions.

use std::collections::VecDeque;

use crate::address::normalize;
use crate::instruction::Instruction;
use crate::trace::Tracer;

/// Which numeric field of a cell a captured pointer refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    /// The A-field.
    A,
    /// The B-field.
    B,
}

/// FIFO of program counters for one warrior. Pushes beyond the configured
/// process cap are dropped silently; a warrior is alive while non-empty.
#[derive(Debug, Clone)]
pub struct ProcessQueue {
    queue: VecDeque<i32>,
    capacity: usize,
}

impl ProcessQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends a program counter, silently dropping it at capacity.
    pub fn push(&mut self, pc: i32) {
        if self.queue.len() < self.capacity {
            self.queue.push_back(pc);
        }
    }

    /// Removes and returns the oldest program counter.
    pub fn pop(&mut self) -> Option<i32> {
        self.queue.pop_front()
    }

    /// Number of live processes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the owning warrior is dead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Program counters in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.queue.iter().copied()
    }
}

/// One round's memory core plus both warriors' process queues.
#[derive(Debug)]
pub struct Core {
    cells: Vec<Instruction>,
    size: i32,
    queues: [ProcessQueue; 2],
    tracer: Tracer,
}

impl Core {
    /// Builds a core of `core_size` default cells with the trace sink taken
    /// from the environment.
    #[must_use]
    pub fn new(core_size: i32, max_processes: usize) -> Self {
        Self::with_tracer(core_size, max_processes, Tracer::from_env())
    }

    /// Builds a core with an explicit trace sink.
    #[must_use]
    pub fn with_tracer(core_size: i32, max_processes: usize, tracer: Tracer) -> Self {
        assert!(core_size >= 2, "core size validated before construction");
        Self {
            cells: vec![Instruction::default(); core_size as usize],
            size: core_size,
            queues: [
                ProcessQueue::with_capacity(max_processes),
                ProcessQueue::with_capacity(max_processes),
            ],
            tracer,
        }
    }

    /// Number of cells.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    fn index(&self, addr: i32) -> usize {
        normalize(addr, self.size) as usize
    }

    /// Copy of the cell at `addr` (reduced modulo the core size).
    #[must_use]
    pub fn fetch(&self, addr: i32) -> Instruction {
        self.cells[self.index(addr)]
    }

    /// One numeric field of the cell at `addr`.
    #[must_use]
    pub fn field(&self, addr: i32, field: CellField) -> i32 {
        let cell = &self.cells[self.index(addr)];
        match field {
            CellField::A => cell.a_field,
            CellField::B => cell.b_field,
        }
    }

    /// Replaces the cell at `addr`, normalizing both fields and tracing the
    /// mutation.
    pub fn store(&mut self, addr: i32, mut value: Instruction) {
        value.a_field = normalize(value.a_field, self.size);
        value.b_field = normalize(value.b_field, self.size);
        let index = self.index(addr);
        self.cells[index] = value;
        self.tracer.write(index as i32, &self.cells[index]);
    }

    /// Adds `delta` to one field of the cell at `addr`, normalizes, traces,
    /// and returns the new field value. This is the pre/postincrement
    /// primitive: the caller captures `(addr, field)` and applies it at the
    /// documented ordering point.
    pub fn bump_field(&mut self, addr: i32, field: CellField, delta: i32) -> i32 {
        let index = self.index(addr);
        let size = self.size;
        let cell = &mut self.cells[index];
        let slot = match field {
            CellField::A => &mut cell.a_field,
            CellField::B => &mut cell.b_field,
        };
        *slot = normalize(*slot + delta, size);
        let value = *slot;
        self.tracer.write(index as i32, &self.cells[index]);
        value
    }

    /// Lays a warrior into the core starting at `start`, normalizing every
    /// field against the core size. Loading is not traced.
    pub fn load_warrior(&mut self, start: i32, instructions: &[Instruction]) {
        for (offset, instr) in instructions.iter().enumerate() {
            let mut cell = *instr;
            cell.a_field = normalize(cell.a_field, self.size);
            cell.b_field = normalize(cell.b_field, self.size);
            let index = self.index(start + offset as i32);
            self.cells[index] = cell;
        }
    }

    /// The process queue of warrior `owner` (0 or 1).
    #[must_use]
    pub fn queue(&self, owner: usize) -> &ProcessQueue {
        &self.queues[owner]
    }

    /// Mutable access to the process queue of warrior `owner`.
    pub fn queue_mut(&mut self, owner: usize) -> &mut ProcessQueue {
        &mut self.queues[owner]
    }

    pub(crate) fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }
}
