//! Fixed-capacity bullet storage with first-fit slot reuse.

use glam::Vec2;
use topdown_shooter_core::{
    circles_intersect, BulletId, BulletOrigin, BulletSnapshot, Heading, BULLET_POOL_CAPACITY,
    BULLET_RADIUS,
};

use crate::Body;

const _: () = assert!(BULLET_POOL_CAPACITY <= u32::BITS as usize);

/// Mask with one bit set for every slot in the pool.
const FULL_MASK: u32 = if BULLET_POOL_CAPACITY == u32::BITS as usize {
    u32::MAX
} else {
    (1 << BULLET_POOL_CAPACITY) - 1
};

/// Projectile stored in a pool slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bullet {
    pub(crate) body: Body,
    pub(crate) origin: BulletOrigin,
}

impl Bullet {
    const DORMANT: Self = Self {
        body: Body {
            position: Vec2::ZERO,
            heading: Heading::from_degrees(0.0),
            speed: 0.0,
        },
        origin: BulletOrigin::Player,
    };
}

/// Array of bullet slots plus an occupancy bitmap.
///
/// Bit `n` of `occupied` is set while slot `n` holds an active bullet. Slots
/// whose bit is clear keep their last contents, which must never be read.
#[derive(Clone, Debug)]
pub(crate) struct BulletPool {
    slots: [Bullet; BULLET_POOL_CAPACITY],
    occupied: u32,
}

impl BulletPool {
    pub(crate) fn new() -> Self {
        Self {
            slots: [Bullet::DORMANT; BULLET_POOL_CAPACITY],
            occupied: 0,
        }
    }

    /// Stores the bullet in the lowest-indexed free slot.
    ///
    /// Returns `None` without touching the pool when every slot is active.
    pub(crate) fn claim(&mut self, bullet: Bullet) -> Option<BulletId> {
        let free = !self.occupied & FULL_MASK;
        if free == 0 {
            return None;
        }

        let index = free.trailing_zeros();
        self.slots[index as usize] = bullet;
        self.occupied |= 1 << index;
        Some(BulletId::new(index))
    }

    /// Deactivates the slot. Returns `false` if it was already inactive.
    pub(crate) fn release(&mut self, id: BulletId) -> bool {
        let Some(mask) = slot_mask(id) else {
            return false;
        };
        let was_active = self.occupied & mask != 0;
        self.occupied &= !mask;
        was_active
    }

    pub(crate) fn is_active(&self, id: BulletId) -> bool {
        slot_mask(id).map_or(false, |mask| self.occupied & mask != 0)
    }

    pub(crate) fn free_slots(&self) -> usize {
        BULLET_POOL_CAPACITY - self.occupied.count_ones() as usize
    }

    /// Active bullets in slot order.
    pub(crate) fn iter_active(&self) -> impl Iterator<Item = (BulletId, &Bullet)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(index, _)| self.occupied & (1 << index) != 0)
            .map(|(index, bullet)| (BulletId::new(index as u32), bullet))
    }

    /// Moves every active bullet one step along its heading.
    pub(crate) fn advance_all(&mut self) {
        for (index, bullet) in self.slots.iter_mut().enumerate() {
            if self.occupied & (1 << index) != 0 {
                bullet.body.position = bullet
                    .body
                    .heading
                    .advance(bullet.body.position, bullet.body.speed);
            }
        }
    }

    /// Lowest-indexed active bullet from `origin` whose hit circle overlaps the target circle.
    pub(crate) fn first_hit(
        &self,
        center: Vec2,
        radius: f32,
        origin: BulletOrigin,
    ) -> Option<BulletId> {
        self.iter_active()
            .find(|(_, bullet)| {
                bullet.origin == origin
                    && circles_intersect(bullet.body.position, BULLET_RADIUS, center, radius)
            })
            .map(|(id, _)| id)
    }

    pub(crate) fn snapshots(&self) -> Vec<BulletSnapshot> {
        self.iter_active()
            .map(|(id, bullet)| BulletSnapshot {
                id,
                position: bullet.body.position,
                heading: bullet.body.heading,
                speed: bullet.body.speed,
                origin: bullet.origin,
            })
            .collect()
    }
}

fn slot_mask(id: BulletId) -> Option<u32> {
    let index = id.get();
    (index < BULLET_POOL_CAPACITY as u32).then(|| 1 << index)
}
