//! # Table Descriptors
//!
//! Scalar metadata carried alongside the cells. None of it influences cell
//! layout; operations copy it from their primary source.
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `descr0`..`descr4` | free numeric user tags |
//! | `cinc`, `cofs` | component axis increment and offset |
//! | `rinc`, `rwid`, `rofs` | record axis increment, width and offset |

use std::str::FromStr;

use eyre::Result;

use crate::table_bail;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptors {
    pub descr: [f64; 5],
    pub comp_inc: f64,
    pub comp_ofs: f64,
    pub comp_unit: String,
    pub rec_inc: f64,
    pub rec_width: f64,
    pub rec_ofs: f64,
    pub rec_unit: String,
    pub file_text: String,
    pub realization_text: String,
    pub variant_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKey {
    Descr0,
    Descr1,
    Descr2,
    Descr3,
    Descr4,
    CompInc,
    CompOfs,
    RecInc,
    RecWidth,
    RecOfs,
}

impl Descriptors {
    pub fn get(&self, key: DescriptorKey) -> f64 {
        match key {
            DescriptorKey::Descr0 => self.descr[0],
            DescriptorKey::Descr1 => self.descr[1],
            DescriptorKey::Descr2 => self.descr[2],
            DescriptorKey::Descr3 => self.descr[3],
            DescriptorKey::Descr4 => self.descr[4],
            DescriptorKey::CompInc => self.comp_inc,
            DescriptorKey::CompOfs => self.comp_ofs,
            DescriptorKey::RecInc => self.rec_inc,
            DescriptorKey::RecWidth => self.rec_width,
            DescriptorKey::RecOfs => self.rec_ofs,
        }
    }

    pub fn set(&mut self, key: DescriptorKey, value: f64) {
        let slot = match key {
            DescriptorKey::Descr0 => &mut self.descr[0],
            DescriptorKey::Descr1 => &mut self.descr[1],
            DescriptorKey::Descr2 => &mut self.descr[2],
            DescriptorKey::Descr3 => &mut self.descr[3],
            DescriptorKey::Descr4 => &mut self.descr[4],
            DescriptorKey::CompInc => &mut self.comp_inc,
            DescriptorKey::CompOfs => &mut self.comp_ofs,
            DescriptorKey::RecInc => &mut self.rec_inc,
            DescriptorKey::RecWidth => &mut self.rec_width,
            DescriptorKey::RecOfs => &mut self.rec_ofs,
        };
        *slot = value;
    }
}

impl FromStr for DescriptorKey {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s.to_ascii_lowercase().as_str() {
            "descr0" => DescriptorKey::Descr0,
            "descr1" => DescriptorKey::Descr1,
            "descr2" => DescriptorKey::Descr2,
            "descr3" => DescriptorKey::Descr3,
            "descr4" => DescriptorKey::Descr4,
            "cinc" => DescriptorKey::CompInc,
            "cofs" => DescriptorKey::CompOfs,
            "rinc" => DescriptorKey::RecInc,
            "rwid" => DescriptorKey::RecWidth,
            "rofs" => DescriptorKey::RecOfs,
            _ => table_bail!(BadOpcode, "unknown descriptor '{}'", s),
        };
        Ok(key)
    }
}
