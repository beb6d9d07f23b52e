//! Fast Doubling algorithm over fixed-length limb buffers.
//!
//! Uses the doubling identities:
//!   F(2n)   = F(n) * (2*F(n+1) - F(n))
//!   F(2n+1) = F(n)^2 + F(n+1)^2
//!
//! Iterates from MSB to LSB, rotating buffer roles with `mem::swap` instead
//! of copying limbs.

use std::mem;

use fibdrv_bignum::{
    add, estimate_limb_count, left_shift, subtract, LimbBuffer, Multiplier, LIMB_BITS,
};

use crate::calculator::{CoreCalculator, FibError};

/// Working buffers of one Fast Doubling run.
///
/// Every buffer has the same length, sized for F(k+1): the largest value the
/// loop ever holds.
struct DoublingState {
    /// Current F(n).
    fk: LimbBuffer,
    /// Current F(n+1).
    fk1: LimbBuffer,
    t1: LimbBuffer,
    t2: LimbBuffer,
    t3: LimbBuffer,
}

impl DoublingState {
    /// Allocate state for computing F(k), initialized to F(0)=0, F(1)=1.
    ///
    /// A failed allocation drops the buffers already acquired.
    fn for_index(k: u64) -> Result<Self, FibError> {
        let len = estimate_limb_count(k.saturating_add(1), LIMB_BITS);
        let mut fk1 = LimbBuffer::zeroed(len)?;
        fk1.set_limb(1);
        Ok(Self {
            fk: LimbBuffer::zeroed(len)?,
            fk1,
            t1: LimbBuffer::zeroed(len)?,
            t2: LimbBuffer::zeroed(len)?,
            t3: LimbBuffer::zeroed(len)?,
        })
    }

    /// (F(n), F(n+1)) -> (F(2n), F(2n+1))
    fn double<M: Multiplier>(&mut self, m: &M) -> Result<(), FibError> {
        // t2 = 2*F(n+1) - F(n)
        left_shift(&mut self.t1, &self.fk1, 1)?;
        subtract(&mut self.t2, &self.t1, &self.fk)?;
        // t3 = F(2n)
        m.multiply(&mut self.t3, &self.fk, &self.t2)?;
        // fk1 = F(n)^2 + F(n+1)^2 = F(2n+1)
        m.square(&mut self.t1, &self.fk)?;
        m.square(&mut self.t2, &self.fk1)?;
        add(&mut self.fk1, &self.t1, &self.t2)?;
        mem::swap(&mut self.fk, &mut self.t3);
        Ok(())
    }

    /// (F(n), F(n+1)) -> (F(n+1), F(n+2))
    fn advance(&mut self) -> Result<(), FibError> {
        add(&mut self.t1, &self.fk, &self.fk1)?;
        mem::swap(&mut self.fk, &mut self.fk1);
        mem::swap(&mut self.fk1, &mut self.t1);
        Ok(())
    }
}

/// Fast Doubling calculator, monomorphized over its multiplier.
pub struct FastDoubling<M: Multiplier> {
    multiplier: M,
    name: String,
}

impl<M: Multiplier> FastDoubling<M> {
    #[must_use]
    pub fn new(multiplier: M) -> Self {
        let name = format!("FastDoubling({})", multiplier.name());
        Self { multiplier, name }
    }

    #[must_use]
    pub fn multiplier(&self) -> &M {
        &self.multiplier
    }

    /// Compute F(k) for any k, including 0 and 1.
    pub fn fibonacci(&self, k: u64) -> Result<LimbBuffer, FibError> {
        let mut state = DoublingState::for_index(k)?;
        if k == 0 {
            return Ok(state.fk);
        }
        for bit in (0..u64::BITS - k.leading_zeros()).rev() {
            state.double(&self.multiplier)?;
            if (k >> bit) & 1 == 1 {
                state.advance()?;
            }
        }
        Ok(state.fk)
    }
}

impl<M: Multiplier> CoreCalculator for FastDoubling<M> {
    fn calculate_core(&self, k: u64) -> Result<LimbBuffer, FibError> {
        self.fibonacci(k)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
