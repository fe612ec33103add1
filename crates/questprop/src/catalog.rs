//! Debug properties offered by the menu, in display order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Dotted system property key.
    pub name: &'static str,
    /// Valid range and default, shown next to the prompt.
    pub hint: &'static str,
    pub prompt: &'static str,
}

pub const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        name: "debug.oculus.gpuLevel",
        hint: "(default=-1, 0-7)",
        prompt: "Enter value for debug.oculus.gpuLevel",
    },
    PropertyDescriptor {
        name: "debug.oculus.cpuLevel",
        hint: "(default=-1, 0-5)",
        prompt: "Enter value for debug.oculus.cpuLevel",
    },
    PropertyDescriptor {
        name: "debug.oculus.refreshRate",
        hint: "(default=-1, 60, 72, 90, 120)",
        prompt: "Enter value for debug.oculus.refreshRate",
    },
    PropertyDescriptor {
        name: "debug.oculus.textureWidth",
        hint: "(default=-1, any value like 2560 or 3072)",
        prompt: "Enter value for debug.oculus.textureWidth",
    },
    PropertyDescriptor {
        name: "debug.oculus.textureHeight",
        hint: "(default=-1, any value like 2560 or 3072)",
        prompt: "Enter value for debug.oculus.textureHeight",
    },
    PropertyDescriptor {
        name: "debug.oculus.foveation.dynamic",
        hint: "(default=-1, disable=0, enable=1)",
        prompt: "Enter value for debug.oculus.foveation.dynamic",
    },
    PropertyDescriptor {
        name: "debug.oculus.foveation.level",
        hint: "(default=-1, 0-4)",
        prompt: "Enter value for debug.oculus.foveation.level (debug.oculus.foveation.dynamic must be disabled to set this property.)",
    },
];
