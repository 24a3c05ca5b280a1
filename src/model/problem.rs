//! Timetabling problem instance types.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Number of teaching days in the weekly grid (Monday–Friday).
pub const DAYS_PER_WEEK: u8 = 5;

/// Number of teaching hours per day (8:00–16:00).
pub const HOURS_PER_DAY: u8 = 8;

const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

const SUBJECTS: [&str; 8] = [
    "Math",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "English",
    "CS",
    "Art",
];

/// A cell of the weekly grid.
///
/// Conflicts are detected on the [`absolute_slot`](TimeSlot::absolute_slot),
/// so two time slots clash exactly when they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTimeSlot"))]
pub struct TimeSlot {
    day: u8,
    hour: u8,
}

impl TimeSlot {
    /// Creates a time slot.
    ///
    /// # Panics
    /// Panics if `day >= DAYS_PER_WEEK` or `hour >= HOURS_PER_DAY`.
    pub fn new(day: u8, hour: u8) -> Self {
        match Self::checked(day, hour) {
            Ok(slot) => slot,
            Err(msg) => panic!("{msg}"),
        }
    }

    /// Creates a time slot, or describes why the cell is off the grid.
    pub fn checked(day: u8, hour: u8) -> Result<Self, String> {
        if day >= DAYS_PER_WEEK {
            return Err(format!("day {day} out of range"));
        }
        if hour >= HOURS_PER_DAY {
            return Err(format!("hour {hour} out of range"));
        }
        Ok(Self { day, hour })
    }

    /// Draws a uniformly random time slot.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            day: rng.random_range(0..DAYS_PER_WEEK),
            hour: rng.random_range(0..HOURS_PER_DAY),
        }
    }

    /// Day index, 0 = Monday.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour index, 0 = 8:00.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Flattened slot index `day * 8 + hour`, in `0..40`.
    pub fn absolute_slot(&self) -> usize {
        self.day as usize * HOURS_PER_DAY as usize + self.hour as usize
    }

    /// Total number of distinct slots in the week.
    pub const fn count() -> usize {
        DAYS_PER_WEEK as usize * HOURS_PER_DAY as usize
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTimeSlot {
    day: u8,
    hour: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = String;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        Self::checked(raw.day, raw.hour)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:00", DAY_NAMES[self.day as usize], 8 + self.hour)
    }
}

/// A class that needs a time slot and a room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchoolClass {
    /// Position of this class in [`ProblemData::classes`].
    pub id: usize,
    /// Subject label, informational only.
    pub subject: String,
    /// Teacher giving the class.
    pub teacher_id: usize,
    /// Student group attending the class.
    pub student_group: usize,
    /// Number of seats the class needs.
    pub required_capacity: u32,
}

impl SchoolClass {
    /// Creates a class description.
    pub fn new(
        id: usize,
        subject: impl Into<String>,
        teacher_id: usize,
        student_group: usize,
        required_capacity: u32,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            teacher_id,
            student_group,
            required_capacity,
        }
    }
}

impl fmt::Display for SchoolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, T{}, G{}",
            self.subject, self.teacher_id, self.student_group
        )
    }
}

/// A room with a fixed number of seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Position of this room in [`ProblemData::rooms`].
    pub id: usize,
    /// Seating capacity.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(id: usize, capacity: u32) -> Self {
        Self { id, capacity }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{} (cap={})", self.id, self.capacity)
    }
}

/// A complete timetabling problem instance.
///
/// Class and room ids are their positions in the respective vectors.
/// The instance is assumed well-formed by its provider; the GA never
/// validates or mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProblemData"))]
pub struct ProblemData {
    classes: Vec<SchoolClass>,
    rooms: Vec<Room>,
    num_teachers: usize,
    num_student_groups: usize,
}

impl ProblemData {
    /// Creates a problem instance.
    ///
    /// # Panics
    /// Panics if there are no rooms, or if a class or room id does not match
    /// its position.
    pub fn new(
        classes: Vec<SchoolClass>,
        rooms: Vec<Room>,
        num_teachers: usize,
        num_student_groups: usize,
    ) -> Self {
        if let Err(msg) = check_layout(&classes, &rooms) {
            panic!("{msg}");
        }
        Self {
            classes,
            rooms,
            num_teachers,
            num_student_groups,
        }
    }

    /// Generates a random instance.
    ///
    /// Room capacities are uniform in 20..=50 and class sizes in 15..=40.
    /// Teachers, groups and subjects are drawn uniformly. The same seed
    /// always yields the same instance, so every worker of a distributed run
    /// can rebuild it locally instead of receiving it.
    pub fn generate_random(
        num_classes: usize,
        num_rooms: usize,
        num_teachers: usize,
        num_groups: usize,
        seed: u64,
    ) -> Self {
        assert!(num_teachers > 0 && num_groups > 0, "need teachers and groups");
        let mut rng = StdRng::seed_from_u64(seed);

        let rooms = (0..num_rooms)
            .map(|id| Room::new(id, rng.random_range(20..=50)))
            .collect();

        let classes = (0..num_classes)
            .map(|id| {
                let subject = SUBJECTS[rng.random_range(0..SUBJECTS.len())];
                let teacher_id = rng.random_range(0..num_teachers);
                let student_group = rng.random_range(0..num_groups);
                let required_capacity = rng.random_range(15..=40);
                SchoolClass::new(id, subject, teacher_id, student_group, required_capacity)
            })
            .collect();

        Self::new(classes, rooms, num_teachers, num_groups)
    }

    /// All classes, indexed by class id.
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    /// All rooms, indexed by room id.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The class with the given id.
    pub fn class(&self, id: usize) -> &SchoolClass {
        &self.classes[id]
    }

    /// The room with the given id.
    pub fn room(&self, id: usize) -> &Room {
        &self.rooms[id]
    }

    /// Number of classes, which is also the gene count of every individual.
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of rooms.
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Number of distinct teachers.
    pub fn num_teachers(&self) -> usize {
        self.num_teachers
    }

    /// Number of distinct student groups.
    pub fn num_student_groups(&self) -> usize {
        self.num_student_groups
    }
}

impl fmt::Display for ProblemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classes={}, rooms={}, teachers={}, groups={}",
            self.classes.len(),
            self.rooms.len(),
            self.num_teachers,
            self.num_student_groups
        )
    }
}

fn check_layout(classes: &[SchoolClass], rooms: &[Room]) -> Result<(), String> {
    if rooms.is_empty() {
        return Err("problem needs at least one room".to_string());
    }
    if let Some((i, class)) = classes.iter().enumerate().find(|(i, c)| c.id != *i) {
        return Err(format!(
            "class id must match its position (id {} at {i})",
            class.id
        ));
    }
    if let Some((i, room)) = rooms.iter().enumerate().find(|(i, r)| r.id != *i) {
        return Err(format!(
            "room id must match its position (id {} at {i})",
            room.id
        ));
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProblemData {
    classes: Vec<SchoolClass>,
    rooms: Vec<Room>,
    num_teachers: usize,
    num_student_groups: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblemData> for ProblemData {
    type Error = String;

    fn try_from(raw: RawProblemData) -> Result<Self, Self::Error> {
        check_layout(&raw.classes, &raw.rooms)?;
        Ok(Self {
            classes: raw.classes,
            rooms: raw.rooms,
            num_teachers: raw.num_teachers,
            num_student_groups: raw.num_student_groups,
        })
    }
}
