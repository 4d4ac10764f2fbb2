//! Serializable simulator state.
//!
//! [`StateView`] is the JSON document served to front ends: registers, PC,
//! the four pipeline latches, data memory, the per-cycle stage history, the
//! hazards of the most recent cycle, and statistics. Field names are part of
//! the client contract and must not change.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::common::constants::NUM_REGS;
use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry, Slot};
use crate::core::pipeline::snapshot::{CycleSnapshot, StageRecord, StageState};
use crate::isa::decode::{Format, Instruction};
use crate::isa::disasm::disassemble;
use crate::isa::instruction::InstructionBits;
use crate::stats::SimStats;

/// Format-specific instruction fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldsView {
    /// R-type fields.
    R {
        /// `rs`.
        rs: usize,
        /// `rt`.
        rt: usize,
        /// `rd`.
        rd: usize,
        /// Shift amount.
        shift: u32,
        /// Function code.
        func: u32,
    },
    /// I-type fields.
    I {
        /// `rs`.
        rs: usize,
        /// `rt`.
        rt: usize,
        /// Extended immediate.
        immediate: i32,
    },
    /// J-type fields.
    J {
        /// 26-bit word target.
        address: u32,
    },
}

/// One instruction as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstructionView {
    /// `0x%08X` encoding.
    pub hex: String,
    /// Primary opcode.
    pub opcode: u32,
    /// Disassembly.
    pub assembly: String,
    /// Encoding format.
    pub format: Format,
    /// Format-specific fields, flattened into the object.
    #[serde(flatten)]
    pub fields: FieldsView,
}

impl From<&Instruction> for InstructionView {
    fn from(inst: &Instruction) -> Self {
        let fields = match inst.format() {
            Format::R => FieldsView::R {
                rs: inst.rs,
                rt: inst.rt,
                rd: inst.rd,
                shift: inst.shamt,
                func: inst.raw.funct(),
            },
            Format::I => FieldsView::I {
                rs: inst.rs,
                rt: inst.rt,
                immediate: inst.imm,
            },
            Format::J => FieldsView::J {
                address: inst.target,
            },
        };
        Self {
            hex: format!("0x{:08X}", inst.raw),
            opcode: inst.opcode(),
            assembly: disassemble(inst),
            format: inst.format(),
            fields,
        }
    }
}

/// IF/ID latch view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IfIdView {
    /// Address of the fetched instruction.
    pub pc: u32,
    /// Fetched instruction; `null` for an empty or bubble latch.
    pub instruction: Option<InstructionView>,
}

impl From<Option<&IfIdEntry>> for IfIdView {
    fn from(entry: Option<&IfIdEntry>) -> Self {
        entry.map_or_else(Self::default, |e| Self {
            pc: e.pc,
            instruction: Some((&e.inst).into()),
        })
    }
}

/// ID/EX latch view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdExView {
    /// Instruction address.
    pub pc: u32,
    /// Decoded instruction.
    pub instruction: Option<InstructionView>,
    /// `rs` index.
    pub rs: usize,
    /// `rt` index.
    pub rt: usize,
    /// `rd` index.
    pub rd: usize,
    /// Value read from `rs`.
    pub read_data1: i32,
    /// Value read from `rt`.
    pub read_data2: i32,
    /// Extended immediate.
    pub sign_ext_imm: i32,
    /// Writes a register.
    pub reg_write: bool,
    /// Reads memory.
    pub mem_read: bool,
    /// Writes memory.
    pub mem_write: bool,
    /// Writes back the loaded word.
    pub mem_to_reg: bool,
    /// Conditional branch.
    pub branch: bool,
}

impl From<Option<&IdExEntry>> for IdExView {
    fn from(entry: Option<&IdExEntry>) -> Self {
        entry.map_or_else(Self::default, |e| Self {
            pc: e.pc,
            instruction: Some((&e.inst).into()),
            rs: e.rs,
            rt: e.rt,
            rd: e.rd,
            read_data1: e.rv1,
            read_data2: e.rv2,
            sign_ext_imm: e.imm,
            reg_write: e.ctrl.reg_write,
            mem_read: e.ctrl.mem_read,
            mem_write: e.ctrl.mem_write,
            mem_to_reg: e.ctrl.mem_to_reg,
            branch: e.ctrl.branch,
        })
    }
}

/// EX/MEM latch view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExMemView {
    /// Instruction address.
    pub pc: u32,
    /// Executed instruction.
    pub instruction: Option<InstructionView>,
    /// ALU result.
    pub alu_result: i32,
    /// Store data.
    pub write_data: i32,
    /// Destination register.
    pub dest_reg: usize,
    /// ALU zero flag.
    pub zero: bool,
    /// Writes a register.
    pub reg_write: bool,
    /// Reads memory.
    pub mem_read: bool,
    /// Writes memory.
    pub mem_write: bool,
    /// Writes back the loaded word.
    pub mem_to_reg: bool,
    /// Conditional branch.
    pub branch: bool,
    /// The branch or `jr` redirected the PC.
    pub branch_taken: bool,
    /// Operand A source: 0 register file, 1 MEM/WB, 2 EX/MEM.
    pub forward_a: u8,
    /// Operand B source: 0 register file, 1 MEM/WB, 2 EX/MEM.
    pub forward_b: u8,
}

impl From<Option<&ExMemEntry>> for ExMemView {
    fn from(entry: Option<&ExMemEntry>) -> Self {
        entry.map_or_else(Self::default, |e| Self {
            pc: e.pc,
            instruction: Some((&e.inst).into()),
            alu_result: e.alu,
            write_data: e.store_data,
            dest_reg: e.dest,
            zero: e.zero,
            reg_write: e.ctrl.reg_write,
            mem_read: e.ctrl.mem_read,
            mem_write: e.ctrl.mem_write,
            mem_to_reg: e.ctrl.mem_to_reg,
            branch: e.ctrl.branch,
            branch_taken: e.branch_taken,
            forward_a: e.forward_a.code(),
            forward_b: e.forward_b.code(),
        })
    }
}

/// MEM/WB latch view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemWbView {
    /// Instruction address.
    pub pc: u32,
    /// Instruction.
    pub instruction: Option<InstructionView>,
    /// ALU result.
    pub alu_result: i32,
    /// Loaded word.
    pub mem_data: i32,
    /// Value written back.
    pub write_data: i32,
    /// Destination register.
    pub dest_reg: usize,
    /// Writes a register.
    pub reg_write: bool,
    /// Writes back the loaded word.
    pub mem_to_reg: bool,
}

impl From<Option<&MemWbEntry>> for MemWbView {
    fn from(entry: Option<&MemWbEntry>) -> Self {
        entry.map_or_else(Self::default, |e| Self {
            pc: e.pc,
            instruction: Some((&e.inst).into()),
            alu_result: e.alu,
            mem_data: e.mem_data,
            write_data: e.write_data,
            dest_reg: e.dest,
            reg_write: e.ctrl.reg_write,
            mem_to_reg: e.ctrl.mem_to_reg,
        })
    }
}

/// The four latches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineView {
    /// IF/ID.
    #[serde(rename = "IF_ID")]
    pub if_id: IfIdView,
    /// ID/EX.
    #[serde(rename = "ID_EX")]
    pub id_ex: IdExView,
    /// EX/MEM.
    #[serde(rename = "EX_MEM")]
    pub ex_mem: ExMemView,
    /// MEM/WB.
    #[serde(rename = "MEM_WB")]
    pub mem_wb: MemWbView,
}

/// One stage in one history entry: its state plus the latch fields it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageView<V> {
    /// What the stage did.
    pub state: StageState,
    /// Latch fields; `instruction` is `null` when the stage had none.
    #[serde(flatten)]
    pub latch: V,
}

impl<V> StageView<V> {
    fn from_record<'a, T: 'a>(record: &'a StageRecord<T>) -> Self
    where
        V: From<Option<&'a T>>,
    {
        Self {
            state: record.state,
            latch: record.entry.as_ref().into(),
        }
    }
}

/// One cycle of the stage timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SnapshotView {
    /// Cycle number.
    pub cycle: u64,
    /// Fetch.
    #[serde(rename = "IF")]
    pub fetch: StageView<IfIdView>,
    /// Decode.
    #[serde(rename = "ID")]
    pub decode: StageView<IdExView>,
    /// Execute.
    #[serde(rename = "EX")]
    pub execute: StageView<ExMemView>,
    /// Memory.
    #[serde(rename = "MEM")]
    pub memory: StageView<MemWbView>,
    /// Writeback.
    #[serde(rename = "WB")]
    pub writeback: StageView<MemWbView>,
    /// Hazards observed in the cycle.
    pub hazards: Vec<Hazard>,
}

impl From<&CycleSnapshot> for SnapshotView {
    fn from(s: &CycleSnapshot) -> Self {
        Self {
            cycle: s.cycle,
            fetch: StageView::from_record(&s.fetch),
            decode: StageView::from_record(&s.decode),
            execute: StageView::from_record(&s.execute),
            memory: StageView::from_record(&s.memory),
            writeback: StageView::from_record(&s.writeback),
            hazards: s.hazards.clone(),
        }
    }
}

/// Data memory as a JSON object keyed by decimal byte address, in address order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataMemoryView(pub Vec<(u32, i32)>);

impl Serialize for DataMemoryView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (addr, value) in &self.0 {
            map.serialize_entry(&addr.to_string(), value)?;
        }
        map.end()
    }
}

/// Complete simulator state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    /// Cycles since the last reset.
    pub cycle: u64,
    /// Next fetch address.
    pub pc: u32,
    /// Register file.
    pub registers: [i32; NUM_REGS],
    /// Latch contents.
    pub pipeline: PipelineView,
    /// All data memory words.
    pub data_memory: DataMemoryView,
    /// Stage timeline, oldest first.
    pub pipeline_history: Vec<SnapshotView>,
    /// Hazards of the most recent cycle.
    pub hazards: Vec<Hazard>,
    /// Statistics.
    pub stats: SimStats,
}

impl StateView {
    /// Serializes to a compact JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to an indented JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Latch view of a slot; empty and bubble slots both yield the default view.
pub(crate) fn latch_view<'a, T: 'a, V: From<Option<&'a T>>>(slot: &'a Slot<T>) -> V {
    slot.valid().into()
}
