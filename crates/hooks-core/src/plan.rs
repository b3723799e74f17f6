use crate::types::{Dimension, Specialist};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// One of the ten phases of the 100-cycle plan, ten cycles each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseInfo {
    pub number: u32,
    pub name: &'static str,
}

const PHASE_NAMES: [&str; 10] = [
    "Foundation & Setup",
    "Backend Schema & Services",
    "Frontend Pages & Components",
    "Integration & Connections",
    "Authentication & Authorization",
    "Knowledge & RAG",
    "Quality & Testing",
    "Design & Wireframes",
    "Performance & Optimization",
    "Deployment & Documentation",
];

pub const UNKNOWN_PHASE: PhaseInfo = PhaseInfo {
    number: 0,
    name: "Unknown",
};

/// `phase(n) = ((n-1)/10)+1` for n in 1..=100.
pub fn phase_for(cycle: u32) -> PhaseInfo {
    if !(1..=100).contains(&cycle) {
        return UNKNOWN_PHASE;
    }
    let number = (cycle - 1) / 10 + 1;
    PhaseInfo {
        number,
        name: PHASE_NAMES[(number - 1) as usize],
    }
}

/// Position within the owning phase, `1..=10`.
pub fn progress_in_phase(cycle: u32) -> u32 {
    (cycle.saturating_sub(1) % 10) + 1
}

// ---------------------------------------------------------------------------
// Cycle → dimension / specialist tables
// ---------------------------------------------------------------------------

const DIMENSION_CYCLES: &[(Dimension, &[u32])] = &[
    (Dimension::Groups, &[6, 18, 43]),
    (Dimension::People, &[7, 42, 43, 44, 45, 46, 47, 48, 49, 50]),
    (Dimension::Things, &[2, 11, 12, 21, 22, 23]),
    (
        Dimension::Connections,
        &[3, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40],
    ),
    (Dimension::Events, &[4, 17, 34, 39, 49]),
    (
        Dimension::Knowledge,
        &[5, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 98, 99],
    ),
];

/// Inclusive cycle ranges per specialist; first match wins, so the ops range
/// claims 95..=99 ahead of the documenter overlap.
const SPECIALIST_RANGES: &[(Specialist, &[(u32, u32)])] = &[
    (Specialist::Director, &[(1, 10)]),
    (Specialist::Backend, &[(11, 20), (41, 50)]),
    (Specialist::Frontend, &[(21, 30)]),
    (Specialist::Integration, &[(31, 40)]),
    (Specialist::Quality, &[(61, 70)]),
    (Specialist::Designer, &[(71, 80)]),
    (Specialist::Ops, &[(81, 99)]),
    (Specialist::Documenter, &[(95, 100)]),
];

/// Cycle groups that may run concurrently.
const PARALLEL_GROUPS: &[(&[(u32, u32)], &str)] = &[
    (
        &[(11, 20), (21, 30)],
        "Backend + Frontend (after schema defined at Cycle 12)",
    ),
    (
        &[(61, 70), (71, 80)],
        "Tests + Design (interdependent validation)",
    ),
    (&[(95, 100)], "Documentation (can start earlier)"),
];

/// All dimensions a cycle touches, in canonical dimension order. Empty for
/// foundation cycles that span every dimension.
pub fn dimensions_for(cycle: u32) -> Vec<Dimension> {
    DIMENSION_CYCLES
        .iter()
        .filter(|(_, cycles)| cycles.contains(&cycle))
        .map(|(dim, _)| *dim)
        .collect()
}

pub fn specialist_for(cycle: u32) -> Option<Specialist> {
    SPECIALIST_RANGES
        .iter()
        .find(|(_, ranges)| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&cycle)))
        .map(|(spec, _)| *spec)
}

pub fn parallel_notes_for(cycle: u32) -> Vec<&'static str> {
    PARALLEL_GROUPS
        .iter()
        .filter(|(ranges, _)| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&cycle)))
        .map(|(_, note)| *note)
        .collect()
}

/// Cycles that must complete before this one. Linear except that frontend
/// cycles also need the schema cycles 12 and 13.
pub fn dependencies_for(cycle: u32) -> Vec<u32> {
    let foundation: Vec<u32> = (1..=10).collect();
    match cycle {
        1..=10 => (1..cycle).collect(),
        11..=20 => foundation.into_iter().chain(11..cycle).collect(),
        21..=30 => foundation
            .into_iter()
            .chain([12, 13])
            .chain(21..cycle)
            .collect(),
        31..=40 => foundation.into_iter().chain(31..cycle).collect(),
        _ => foundation,
    }
}

// ---------------------------------------------------------------------------
// Task texts
// ---------------------------------------------------------------------------

const TASKS: [&str; 100] = [
    "Validate idea against 6-dimension ontology",
    "Map idea to specific entity types (66+ thing types)",
    "Identify connection types needed (25+ relationship types)",
    "List event types that will be triggered (67+ event types)",
    "Determine knowledge requirements (embeddings, vectors, RAG)",
    "Identify organization scope (single-tenant vs multi-tenant)",
    "Define people roles involved (4 roles)",
    "Create high-level vision document",
    "Generate initial plan with feature breakdown",
    "Assign features to specialists",
    "Design database schema changes",
    "Update backend/convex/schema.ts",
    "Create Effect.ts service for business logic",
    "Define service errors with tagged unions",
    "Write Convex queries for read operations",
    "Write Convex mutations for write operations",
    "Add event logging to all mutations",
    "Implement organization scoping",
    "Add rate limiting to mutations",
    "Write unit tests for Effect.ts services",
    "Create Astro page with SSR data fetching",
    "Build React components for interactive UI",
    "Use shadcn/ui components (50+ pre-installed)",
    "Implement loading states with Suspense",
    "Add error boundaries for graceful failures",
    "Create forms with validation",
    "Implement client-side state with Convex hooks",
    "Style with Tailwind v4",
    "Ensure responsive design (mobile-first)",
    "Add dark mode support",
    "Map external system to ontology dimensions",
    "Create connection records for system relationships",
    "Implement data synchronization logic",
    "Add event tracking for cross-system actions",
    "Create webhook handlers",
    "Implement polling logic",
    "Add error handling for integration failures",
    "Create retry logic with exponential backoff",
    "Log all integration events",
    "Write integration tests for data flows",
    "Configure Better Auth with 6 methods",
    "Implement role-based access control (4 roles)",
    "Add organization-scoped permissions",
    "Create session management with JWT tokens",
    "Implement password reset flow",
    "Add email verification flow",
    "Enable 2FA",
    "Add brute force protection",
    "Log all auth events",
    "Write auth integration tests",
    "Create knowledge records with labels",
    "Generate embeddings for content",
    "Store vectors in knowledge table",
    "Implement vector search",
    "Create RAG pipeline",
    "Link knowledge to things via junction table",
    "Add semantic search to UI",
    "Implement knowledge graph traversal",
    "Create AI-powered recommendations",
    "Test RAG accuracy with sample queries",
    "Define user flows",
    "Create acceptance criteria",
    "Write unit tests for services",
    "Write integration tests for flows",
    "Write e2e tests for critical paths",
    "Run tests and capture results",
    "Validate against ontology",
    "Check type safety",
    "Run linter",
    "Fix all failing tests",
    "Create wireframes that satisfy acceptance criteria",
    "Design component architecture",
    "Set design tokens",
    "Ensure WCAG AA accessibility",
    "Design loading states and skeletons",
    "Create error state designs",
    "Design empty states",
    "Implement animations and transitions",
    "Validate design enables tests to pass",
    "Get design approval",
    "Optimize database queries",
    "Implement pagination for large lists",
    "Add caching where appropriate",
    "Optimize images",
    "Minimize JavaScript bundle size",
    "Use Astro Islands for selective hydration",
    "Enable SSR for critical pages",
    "Optimize Lighthouse scores",
    "Test on slow connections",
    "Monitor Core Web Vitals",
    "Build production bundle",
    "Deploy backend to Convex Cloud",
    "Deploy frontend to Cloudflare Pages",
    "Run smoke tests in production",
    "Write feature documentation",
    "Update API documentation",
    "Create user guide",
    "Capture lessons learned",
    "Update knowledge base with patterns",
    "Mark feature complete and notify stakeholders",
];

pub const UNKNOWN_TASK: &str = "Unknown task";

// ---------------------------------------------------------------------------
// TaskDescriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TaskDescriptor {
    pub cycle: u32,
    pub text: &'static str,
    pub phase: PhaseInfo,
    pub dimensions: Vec<Dimension>,
    pub specialist: Option<Specialist>,
}

/// Pure lookup. Cycles outside 1..=100 yield the sentinel descriptor.
pub fn describe(cycle: u32) -> TaskDescriptor {
    if !(1..=100).contains(&cycle) {
        return TaskDescriptor {
            cycle,
            text: UNKNOWN_TASK,
            phase: UNKNOWN_PHASE,
            dimensions: Vec::new(),
            specialist: None,
        };
    }
    TaskDescriptor {
        cycle,
        text: TASKS[(cycle - 1) as usize],
        phase: phase_for(cycle),
        dimensions: dimensions_for(cycle),
        specialist: specialist_for(cycle),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
